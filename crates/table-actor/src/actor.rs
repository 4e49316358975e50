//! # Table Actor
//!
//! The `TableActor` owns an in-memory table of [`TableRecord`] rows and serves
//! [`TableRequest`]s sequentially from a single Tokio task. Because only this task
//! ever touches the map, no `Mutex` or `RwLock` is needed, and every request is
//! applied atomically with respect to every other request.

use crate::client::TableClient;
use crate::error::TableError;
use crate::message::{PatchReport, TableRequest};
use crate::record::TableRecord;
use std::collections::{HashMap, HashSet};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that owns one table.
///
/// # Usage Pattern
///
/// 1.  **Create**: `TableActor::new(buffer)` returns the actor and its client.
/// 2.  **Run**: spawn `actor.run()` in a background task.
/// 3.  **Stop**: drop every client; the loop exits once the channel closes.
///
/// ```rust
/// use table_actor::{TableActor, TableRecord};
///
/// #[derive(Clone, Debug)]
/// struct Row { id: u32, group: String, hits: u32 }
/// #[derive(Debug)] struct RowInsert { group: String }
/// #[derive(Debug)] struct Hit;
/// #[derive(Debug, thiserror::Error)] #[error("never")] struct RowError;
///
/// impl TableRecord for Row {
///     type Id = u32;
///     type Partition = String;
///     type Insert = RowInsert;
///     type Patch = Hit;
///     type Error = RowError;
///
///     fn from_insert(id: u32, params: RowInsert) -> Result<Self, Self::Error> {
///         Ok(Self { id, group: params.group, hits: 0 })
///     }
///     fn partition(&self) -> &String { &self.group }
///     fn apply(&mut self, _: &Hit) -> Result<bool, Self::Error> {
///         self.hits += 1;
///         Ok(true)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = TableActor::<Row>::new(10);
///     tokio::spawn(actor.run());
///
///     let id = client.insert(RowInsert { group: "a".into() }).await.unwrap();
///     let row = client.patch(id, Hit).await.unwrap();
///     assert_eq!(row.hits, 1);
///     assert_eq!(client.scan("a".into()).await.unwrap().len(), 1);
/// }
/// ```
pub struct TableActor<T: TableRecord> {
    receiver: mpsc::Receiver<TableRequest<T>>,
    rows: HashMap<T::Id, T>,
    next_id: u32,
}

impl<T: TableRecord> TableActor<T> {
    /// Creates a new actor and the client used to reach it.
    ///
    /// `buffer_size` is the capacity of the request channel; once it is full,
    /// client calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, TableClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            rows: HashMap::new(),
            next_id: 1,
        };
        (actor, TableClient::new(sender))
    }

    /// Runs the request loop until every client has been dropped.
    pub async fn run(mut self) {
        // "LineItem" rather than "edition_ledger::model::line_item::LineItem"
        let table = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(table, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                TableRequest::Insert { params, respond_to } => {
                    debug!(table, ?params, "Insert");
                    let Some(following) = self.next_id.checked_add(1) else {
                        warn!(table, "Insert rejected, ids exhausted");
                        let _ = respond_to.send(Err(TableError::IdsExhausted));
                        continue;
                    };
                    let id = T::Id::from(self.next_id);
                    self.next_id = following;
                    match T::from_insert(id.clone(), params) {
                        Ok(row) => {
                            self.rows.insert(id.clone(), row);
                            info!(table, %id, size = self.rows.len(), "Inserted");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(table, error = %e, "Insert rejected");
                            let _ = respond_to.send(Err(TableError::Record {
                                id: id.to_string(),
                                source: Box::new(e),
                            }));
                        }
                    }
                }
                TableRequest::Get { id, respond_to } => {
                    let row = self.rows.get(&id).cloned();
                    debug!(table, %id, found = row.is_some(), "Get");
                    let _ = respond_to.send(Ok(row));
                }
                TableRequest::Scan {
                    partition,
                    respond_to,
                } => {
                    let rows: Vec<T> = match &partition {
                        Some(key) => self
                            .rows
                            .values()
                            .filter(|row| row.partition() == key)
                            .cloned()
                            .collect(),
                        None => self.rows.values().cloned().collect(),
                    };
                    debug!(table, ?partition, rows = rows.len(), "Scan");
                    let _ = respond_to.send(Ok(rows));
                }
                TableRequest::Partitions { respond_to } => {
                    let keys: HashSet<&T::Partition> =
                        self.rows.values().map(|row| row.partition()).collect();
                    let keys: Vec<T::Partition> = keys.into_iter().cloned().collect();
                    debug!(table, partitions = keys.len(), "Partitions");
                    let _ = respond_to.send(Ok(keys));
                }
                TableRequest::Patch {
                    id,
                    patch,
                    respond_to,
                } => {
                    debug!(table, %id, ?patch, "Patch");
                    let result = self.apply_one(&id, &patch).map(|_| ());
                    let reply = result.and_then(|()| {
                        self.rows
                            .get(&id)
                            .cloned()
                            .ok_or_else(|| TableError::NotFound(id.to_string()))
                    });
                    match &reply {
                        Ok(_) => info!(table, %id, "Patched"),
                        Err(e) => warn!(table, %id, error = %e, "Patch failed"),
                    }
                    let _ = respond_to.send(reply);
                }
                TableRequest::PatchMany {
                    patches,
                    respond_to,
                } => {
                    debug!(table, count = patches.len(), "PatchMany");
                    let mut report = PatchReport::default();
                    let mut failure = None;
                    for (id, patch) in &patches {
                        match self.apply_one(id, patch) {
                            Ok(changed) => {
                                report.applied += 1;
                                if changed {
                                    report.changed += 1;
                                }
                            }
                            Err(e) => {
                                warn!(table, %id, applied = report.applied, error = %e, "PatchMany aborted");
                                failure = Some(TableError::Aborted {
                                    applied: report.applied,
                                    source: Box::new(e),
                                });
                                break;
                            }
                        }
                    }
                    let reply = match failure {
                        Some(e) => Err(e),
                        None => {
                            info!(table, applied = report.applied, changed = report.changed, "PatchMany ok");
                            Ok(report)
                        }
                    };
                    let _ = respond_to.send(reply);
                }
            }
        }

        info!(table, size = self.rows.len(), "Shutdown");
    }

    fn apply_one(&mut self, id: &T::Id, patch: &T::Patch) -> Result<bool, TableError> {
        let row = self
            .rows
            .get_mut(id)
            .ok_or_else(|| TableError::NotFound(id.to_string()))?;
        row.apply(patch).map_err(|e| TableError::Record {
            id: id.to_string(),
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Note {
        id: u32,
    }

    #[derive(Debug)]
    struct NoteInsert;

    #[derive(Debug)]
    struct Touch;

    #[derive(Debug, thiserror::Error)]
    #[error("never")]
    struct NoteError;

    impl TableRecord for Note {
        type Id = u32;
        type Partition = u32;
        type Insert = NoteInsert;
        type Patch = Touch;
        type Error = NoteError;

        fn from_insert(id: u32, _: NoteInsert) -> Result<Self, NoteError> {
            Ok(Self { id })
        }

        fn partition(&self) -> &u32 {
            &self.id
        }

        fn apply(&mut self, _: &Touch) -> Result<bool, NoteError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_insert_stops_when_ids_run_out() {
        let (mut actor, client) = TableActor::<Note>::new(4);
        actor.next_id = u32::MAX - 1;
        tokio::spawn(actor.run());

        assert_eq!(client.insert(NoteInsert).await.unwrap(), u32::MAX - 1);
        let result = client.insert(NoteInsert).await;
        assert!(matches!(result, Err(TableError::IdsExhausted)));

        // the table keeps serving everything else
        assert_eq!(client.scan_all().await.unwrap().len(), 1);
    }
}
