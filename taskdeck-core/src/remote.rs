//! Remote store contract consumed by the client collection.
//!
//! The backend is opaque: anything that can list, create, update, and
//! delete task records and push a [`ChangeEvent`] for every change (from
//! any client, including the caller's own writes) satisfies
//! [`RemoteStore`]. The echo of a client's own write is deliberate; it
//! is the non-optimistic update path for create/update/delete.

use std::cmp::Ordering;

use tokio::sync::broadcast;

use crate::task::{CreateTaskData, Task, TaskId, TaskPatch};

/// Errors surfaced by remote store operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteError {
    /// The backend could not be reached; transient, retryable by the user.
    #[error("backend unreachable: {0}")]
    Network(String),

    /// A mutation referenced an id the backend no longer has.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The backend rejected malformed task data.
    #[error("invalid task data: {0}")]
    Validation(String),
}

/// What kind of change a push event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeAction {
    /// A record was created.
    Create,
    /// A record was updated.
    Update,
    /// A record was deleted.
    Delete,
}

/// A push event describing one change to the remote collection.
///
/// For `Delete`, `record` carries the last known state of the removed
/// task (its id is what matters to receivers).
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    /// What happened.
    pub action: ChangeAction,
    /// The record after the change (or as removed, for deletes).
    pub record: Task,
}

/// A record field a [`SortHint`] can order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Manual-sort position.
    Order,
    /// Creation timestamp.
    Created,
    /// Last-mutation timestamp.
    Updated,
}

impl SortField {
    fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::Order => a.order.cmp(&b.order),
            Self::Created => a.created.cmp(&b.created),
            Self::Updated => a.updated.cmp(&b.updated),
        }
    }
}

/// Server-side ordering requested from [`RemoteStore::list_all`]: the
/// fields are applied in sequence, each ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortHint {
    /// Fields to order by, outermost first.
    pub fields: Vec<SortField>,
}

impl SortHint {
    /// The baseline manual order: `order` then `created`, ascending.
    #[must_use]
    pub fn manual() -> Self {
        Self {
            fields: vec![SortField::Order, SortField::Created],
        }
    }

    /// Compares two tasks under the hint's field chain.
    #[must_use]
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        self.fields
            .iter()
            .map(|field| field.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// A live subscription to remote change events.
///
/// Dropping the handle releases the subscription; no further events can
/// reach the holder after that, which is the teardown guarantee callers
/// rely on.
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<ChangeEvent>,
}

impl Subscription {
    /// Wraps a broadcast receiver obtained from a backend.
    #[must_use]
    pub const fn new(rx: broadcast::Receiver<ChangeEvent>) -> Self {
        Self { rx }
    }

    /// Awaits the next change event.
    ///
    /// Events missed while the receiver lagged are skipped with a
    /// warning; the stream then resumes from the oldest retained event.
    /// Returns `None` once the backend side is gone.
    pub async fn next(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "subscription lagged; change events skipped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// The operations the client collection needs from a backend.
///
/// Implementations must push a [`ChangeEvent`] to every live
/// [`Subscription`] for each successful create/update/delete, including
/// ones initiated by the caller itself.
pub trait RemoteStore: Send + Sync {
    /// Fetches every task, ordered per `hint`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Network`] on connectivity failure.
    fn list_all(
        &self,
        hint: SortHint,
    ) -> impl std::future::Future<Output = Result<Vec<Task>, RemoteError>> + Send;

    /// Creates a task and returns the stored record with its assigned
    /// id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Validation`] for malformed data or
    /// [`RemoteError::Network`] on connectivity failure.
    fn create(
        &self,
        data: CreateTaskData,
    ) -> impl std::future::Future<Output = Result<Task, RemoteError>> + Send;

    /// Applies a partial update and returns the record after the change.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::NotFound`] for an unknown id or
    /// [`RemoteError::Network`] on connectivity failure.
    fn update(
        &self,
        id: &TaskId,
        patch: TaskPatch,
    ) -> impl std::future::Future<Output = Result<Task, RemoteError>> + Send;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::NotFound`] for an unknown id or
    /// [`RemoteError::Network`] on connectivity failure.
    fn delete(
        &self,
        id: &TaskId,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;

    /// Opens a subscription to all future change events.
    fn subscribe_all(&self) -> Subscription;
}
