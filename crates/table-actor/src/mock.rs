//! # Mock Table & Testing Guide
//!
//! `MockTable<T>` hands out a real [`TableClient<T>`], but answers its requests from a
//! queue of scripted expectations instead of a live table. Use it to test code that
//! sits on top of a client (repositories, services) without spawning an actor, and to
//! inject failures that are awkward to provoke against real state.
//!
//! | Feature | MockTable | Real TableActor |
//! |---------|-----------|-----------------|
//! | **State** | None (scripted replies) | Real rows |
//! | **Determinism** | Fully deterministic | Subject to scheduler |
//! | **Error Injection** | `return_err` | Requires rejecting rows |
//! | **Use Case** | Logic *around* the client | The table itself, full flows |
//!
//! Expectations are consumed strictly in order. A request that does not match the next
//! expectation panics the mock's task, which the caller observes as
//! [`TableError::ActorDropped`]; [`MockTable::verify`] then reports the leftovers.
//!
//! ## Example: failing write
//!
//! ```rust
//! use table_actor::mock::MockTable;
//! use table_actor::{TableError, TableRecord};
//!
//! #[derive(Clone, Debug)] struct Row { id: u32, group: u8 }
//! #[derive(Debug)] struct RowInsert;
//! #[derive(Debug)] struct RowPatch;
//! #[derive(Debug, thiserror::Error)] #[error("row error")] struct RowError;
//!
//! impl TableRecord for Row {
//!     type Id = u32; type Partition = u8; type Insert = RowInsert;
//!     type Patch = RowPatch; type Error = RowError;
//!     fn from_insert(id: u32, _: RowInsert) -> Result<Self, RowError> { Ok(Self { id, group: 0 }) }
//!     fn partition(&self) -> &u8 { &self.group }
//!     fn apply(&mut self, _: &RowPatch) -> Result<bool, RowError> { Ok(true) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockTable::<Row>::new();
//!     mock.expect_patch_many().return_err(TableError::ActorClosed);
//!
//!     let client = mock.client();
//!     let result = client.patch_many(vec![(1, RowPatch)]).await;
//!     assert!(matches!(result, Err(TableError::ActorClosed)));
//!
//!     assert_eq!(mock.take_patch_batches().len(), 1);
//!     mock.verify();
//! }
//! ```
//!
//! Use [`create_mock_table`] with [`expect_scan`] / [`expect_patch_many`] when a test
//! needs to inspect a request and reply by hand.

use crate::client::TableClient;
use crate::error::TableError;
use crate::message::{PatchReport, TableRequest};
use crate::record::TableRecord;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: TableRecord> {
    Insert {
        response: Result<T::Id, TableError>,
    },
    Get {
        response: Result<Option<T>, TableError>,
    },
    Scan {
        response: Result<Vec<T>, TableError>,
    },
    Partitions {
        response: Result<Vec<T::Partition>, TableError>,
    },
    Patch {
        response: Result<T, TableError>,
    },
    PatchMany {
        response: Result<PatchReport, TableError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;
type PatchLog<T> = Arc<Mutex<Vec<Vec<(<T as TableRecord>::Id, <T as TableRecord>::Patch)>>>>;

/// A scripted table for tests.
pub struct MockTable<T: TableRecord> {
    client: TableClient<T>,
    expectations: Queue<T>,
    patch_batches: PatchLog<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: TableRecord> Default for MockTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TableRecord> MockTable<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<TableRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let patch_batches: PatchLog<T> = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let log = patch_batches.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (TableRequest::Insert { respond_to, .. }, Some(Expectation::Insert { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (TableRequest::Get { respond_to, .. }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (TableRequest::Scan { respond_to, .. }, Some(Expectation::Scan { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        TableRequest::Partitions { respond_to },
                        Some(Expectation::Partitions { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        TableRequest::Patch { id, patch, respond_to },
                        Some(Expectation::Patch { response }),
                    ) => {
                        log.lock().unwrap().push(vec![(id, patch)]);
                        let _ = respond_to.send(response);
                    }
                    (
                        TableRequest::PatchMany { patches, respond_to },
                        Some(Expectation::PatchMany { response }),
                    ) => {
                        log.lock().unwrap().push(patches);
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {:?}", request);
                    }
                }
            }
        });

        Self {
            client: TableClient::new(sender),
            expectations,
            patch_batches,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> TableClient<T> {
        self.client.clone()
    }

    pub fn expect_insert(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Insert { response })
    }

    pub fn expect_get(&mut self) -> ExpectationBuilder<T, Option<T>> {
        self.builder(|response| Expectation::Get { response })
    }

    pub fn expect_scan(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::Scan { response })
    }

    pub fn expect_partitions(&mut self) -> ExpectationBuilder<T, Vec<T::Partition>> {
        self.builder(|response| Expectation::Partitions { response })
    }

    pub fn expect_patch(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Patch { response })
    }

    pub fn expect_patch_many(&mut self) -> ExpectationBuilder<T, PatchReport> {
        self.builder(|response| Expectation::PatchMany { response })
    }

    fn builder<R>(
        &mut self,
        wrap: fn(Result<R, TableError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            wrap,
            expectations: self.expectations.clone(),
        }
    }

    /// Drains every patch payload the mock has received, one entry per request.
    pub fn take_patch_batches(&self) -> Vec<Vec<(T::Id, T::Patch)>> {
        std::mem::take(&mut *self.patch_batches.lock().unwrap())
    }

    /// Panics if any expectation was never consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T: TableRecord, R> {
    wrap: fn(Result<R, TableError>) -> Expectation<T>,
    expectations: Queue<T>,
}

impl<T: TableRecord, R> ExpectationBuilder<T, R> {
    /// Reply with a successful result.
    pub fn return_ok(self, value: R) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Ok(value)));
    }

    /// Reply with an error.
    pub fn return_err(self, error: TableError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Err(error)));
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the actor: it pulls requests off the receiver with the `expect_*`
/// helpers below, asserts on their payloads, and answers through the returned sender.
pub fn create_mock_table<T: TableRecord>(
    buffer_size: usize,
) -> (TableClient<T>, mpsc::Receiver<TableRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (TableClient::new(sender), receiver)
}

/// Next request must be a Scan; returns its partition and responder.
pub async fn expect_scan<T: TableRecord>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(
    Option<T::Partition>,
    oneshot::Sender<Result<Vec<T>, TableError>>,
)> {
    match receiver.recv().await {
        Some(TableRequest::Scan {
            partition,
            respond_to,
        }) => Some((partition, respond_to)),
        _ => None,
    }
}

/// Next request must be a Get; returns its id and responder.
pub async fn expect_get<T: TableRecord>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, TableError>>)> {
    match receiver.recv().await {
        Some(TableRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next request must be a PatchMany; returns its patches and responder.
pub async fn expect_patch_many<T: TableRecord>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(
    Vec<(T::Id, T::Patch)>,
    oneshot::Sender<Result<PatchReport, TableError>>,
)> {
    match receiver.recv().await {
        Some(TableRequest::PatchMany {
            patches,
            respond_to,
        }) => Some((patches, respond_to)),
        _ => None,
    }
}
