//! # Table Client
//!
//! The generic, cloneable handle used to send requests to a table actor.

use crate::error::TableError;
use crate::message::{PatchReport, TableRequest};
use crate::record::TableRecord;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `TableActor`.
///
/// The client holds only the sending half of the actor's channel, so cloning it is
/// cheap and clones can be moved freely across tasks. Every method awaits the
/// actor's reply; [`TableError::ActorClosed`] means the request never reached the
/// actor, [`TableError::ActorDropped`] means it was accepted but never answered.
pub struct TableClient<T: TableRecord> {
    sender: mpsc::Sender<TableRequest<T>>,
}

impl<T: TableRecord> Clone for TableClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: TableRecord> TableClient<T> {
    pub fn new(sender: mpsc::Sender<TableRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, TableError>>) -> TableRequest<T>,
    ) -> Result<R, TableError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| TableError::ActorClosed)?;
        response.await.map_err(|_| TableError::ActorDropped)?
    }

    pub async fn insert(&self, params: T::Insert) -> Result<T::Id, TableError> {
        self.request(|respond_to| TableRequest::Insert { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, TableError> {
        self.request(|respond_to| TableRequest::Get { id, respond_to })
            .await
    }

    /// Every row of `partition`, in no particular order.
    pub async fn scan(&self, partition: T::Partition) -> Result<Vec<T>, TableError> {
        self.request(|respond_to| TableRequest::Scan {
            partition: Some(partition),
            respond_to,
        })
        .await
    }

    /// Every row of the table, in no particular order.
    pub async fn scan_all(&self) -> Result<Vec<T>, TableError> {
        self.request(|respond_to| TableRequest::Scan {
            partition: None,
            respond_to,
        })
        .await
    }

    pub async fn partitions(&self) -> Result<Vec<T::Partition>, TableError> {
        self.request(|respond_to| TableRequest::Partitions { respond_to })
            .await
    }

    pub async fn patch(&self, id: T::Id, patch: T::Patch) -> Result<T, TableError> {
        self.request(|respond_to| TableRequest::Patch {
            id,
            patch,
            respond_to,
        })
        .await
    }

    pub async fn patch_many(
        &self,
        patches: Vec<(T::Id, T::Patch)>,
    ) -> Result<PatchReport, TableError> {
        self.request(|respond_to| TableRequest::PatchMany {
            patches,
            respond_to,
        })
        .await
    }
}
