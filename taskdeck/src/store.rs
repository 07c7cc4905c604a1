//! The task collection: sole owner of the in-memory task list.
//!
//! [`TaskCollection`] mediates between user intent, local state, and a
//! remote [`RemoteStore`]. Create, update, and delete never touch local
//! state directly; the backend's echoed [`ChangeEvent`] is the single
//! update path for them, which avoids any local/remote id reconciliation.
//! Reorder is the one optimistic operation: the new sequence is applied
//! locally before the per-task order writes go out, because drag
//! responsiveness matters more than write confirmation there. A failed
//! reorder is therefore reported but not rolled back in-session; a
//! reload restores the server-confirmed order.

use std::sync::Arc;

use futures_util::future;

use taskdeck_core::remote::{
    ChangeAction, ChangeEvent, RemoteError, RemoteStore, SortHint, Subscription,
};
use taskdeck_core::task::{CreateTaskData, Task, TaskId, TaskPatch};

use crate::notify::Notifier;

/// Lifecycle of the collection.
///
/// `Uninitialized -> Loading -> Ready`, driven by [`TaskCollection::load`].
/// A failed load drops back to `Uninitialized` (manual reload only);
/// after the first successful load the collection never re-enters
/// `Loading` — all refresh is event-driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No load attempted yet (or the last attempt failed).
    #[default]
    Uninitialized,
    /// A load is in flight; the list is empty.
    Loading,
    /// Loaded and subscribed; mutations are valid.
    Ready,
}

/// The authoritative in-memory task list and its synchronization logic.
///
/// Owned by a single cooperative consumer (UI-thread style): all
/// mutations, including applied push events, are serialized through the
/// owner's event loop. Every other component reads the list through
/// [`tasks`](Self::tasks) only.
pub struct TaskCollection<R: RemoteStore> {
    remote: Arc<R>,
    notifier: Notifier,
    tasks: Vec<Task>,
    state: LoadState,
    subscription: Option<Subscription>,
}

impl<R: RemoteStore> TaskCollection<R> {
    /// Creates an empty, unloaded collection over the given backend.
    ///
    /// The notifier is injected here so operation outcomes surface
    /// without any ambient lookup.
    #[must_use]
    pub fn new(remote: Arc<R>, notifier: Notifier) -> Self {
        Self {
            remote,
            notifier,
            tasks: Vec::new(),
            state: LoadState::default(),
            subscription: None,
        }
    }

    /// The current task list, in reconciliation order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> LoadState {
        self.state
    }

    /// True once the initial load succeeded; mutations are only valid
    /// then (callers defer or reject them otherwise).
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// Fetches the full task set in baseline manual order (`order`,
    /// `created`) and opens the change subscription.
    ///
    /// On failure the list stays empty, an error notice is emitted, and
    /// the state drops back to [`LoadState::Uninitialized`] so the user
    /// can retry; there is no automatic retry. Once `Ready`, further
    /// calls are no-ops: refresh is purely event-driven.
    pub async fn load(&mut self) {
        match self.state {
            LoadState::Uninitialized => {}
            LoadState::Loading | LoadState::Ready => {
                tracing::debug!(state = ?self.state, "load skipped");
                return;
            }
        }
        self.state = LoadState::Loading;
        match self.remote.list_all(SortHint::manual()).await {
            Ok(tasks) => {
                self.tasks = tasks;
                self.subscription = Some(self.remote.subscribe_all());
                self.state = LoadState::Ready;
                tracing::debug!(count = self.tasks.len(), "task collection loaded");
            }
            Err(err) => {
                tracing::warn!(%err, "failed to load tasks");
                self.tasks.clear();
                self.state = LoadState::Uninitialized;
                self.notifier.error(
                    "Failed to load tasks",
                    "Please check your connection and try again.",
                );
            }
        }
    }

    /// Sends a new task to the backend.
    ///
    /// The task is NOT inserted locally; the backend's create echo
    /// appends it via [`apply_change`](Self::apply_change), so the local
    /// list only ever holds records with server-assigned ids.
    ///
    /// # Errors
    ///
    /// Re-raises the remote error after emitting the failure notice, so
    /// UI flows (an open form, say) can keep their own state.
    pub async fn create(&self, data: CreateTaskData) -> Result<(), RemoteError> {
        let title = data.title.clone();
        match self.remote.create(data).await {
            Ok(_) => {
                self.notifier.success(
                    "Task created!",
                    format!("\"{title}\" has been added to your list."),
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "failed to create task");
                self.notifier.error("Failed to create task", "Please try again.");
                Err(err)
            }
        }
    }

    /// Sends a partial update to the backend.
    ///
    /// Local state changes only on the update echo. A patch that toggles
    /// `completed` gets completion-aware wording; everything else gets
    /// the generic confirmation.
    ///
    /// # Errors
    ///
    /// Re-raises the remote error after emitting the failure notice.
    pub async fn update(&self, id: &TaskId, patch: TaskPatch) -> Result<(), RemoteError> {
        let toggled = patch.completed;
        match self.remote.update(id, patch).await {
            Ok(_) => {
                match toggled {
                    Some(true) => self
                        .notifier
                        .success("Task completed!", "Great job! Keep up the momentum."),
                    Some(false) => self
                        .notifier
                        .success("Task reopened", "Task marked as active again."),
                    None => self
                        .notifier
                        .success("Task updated!", "Your changes have been saved."),
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%id, %err, "failed to update task");
                self.notifier.error("Failed to update task", "Please try again.");
                Err(err)
            }
        }
    }

    /// Sends a deletion to the backend; local removal happens on the
    /// delete echo.
    ///
    /// # Errors
    ///
    /// Re-raises the remote error after emitting the failure notice.
    pub async fn delete(&self, id: &TaskId) -> Result<(), RemoteError> {
        match self.remote.delete(id).await {
            Ok(()) => {
                self.notifier.success(
                    "Task deleted",
                    "The task has been removed from your list.",
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%id, %err, "failed to delete task");
                self.notifier.error("Failed to delete task", "Please try again.");
                Err(err)
            }
        }
    }

    /// Replaces the local list with the caller-supplied sequence
    /// immediately, then persists one `order = index` write per task,
    /// all concurrently.
    ///
    /// The optimistic replacement is final for this session even if
    /// writes fail: a single notice tells the user the order will be
    /// restored on refresh, and nothing is rolled back. Only meaningful
    /// while manual sort is active.
    pub async fn reorder(&mut self, sequence: Vec<Task>) {
        self.tasks = sequence;

        let writes = self.tasks.iter().enumerate().map(|(index, task)| {
            let remote = Arc::clone(&self.remote);
            let id = task.id.clone();
            async move {
                let index = i64::try_from(index).unwrap_or(i64::MAX);
                remote.update(&id, TaskPatch::order(index)).await
            }
        });
        let results = future::join_all(writes).await;

        if let Some(err) = results.iter().find_map(|r| r.as_ref().err()) {
            tracing::warn!(%err, "failed to persist task order");
            self.notifier.error(
                "Failed to save task order",
                "The order will be restored on refresh.",
            );
        }
    }

    /// Applies one remote push event to the local list. Idempotent:
    /// re-applying an event (or applying one for an id that is already
    /// gone) is a safe no-op.
    ///
    /// Create appends iff the id is not present; update replaces the
    /// matching task in place, preserving its position; delete removes
    /// the matching task.
    pub fn apply_change(&mut self, event: ChangeEvent) {
        match event.action {
            ChangeAction::Create => {
                if !self.tasks.iter().any(|t| t.id == event.record.id) {
                    self.tasks.push(event.record);
                }
            }
            ChangeAction::Update => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == event.record.id) {
                    *slot = event.record;
                }
            }
            ChangeAction::Delete => {
                self.tasks.retain(|t| t.id != event.record.id);
            }
        }
    }

    /// Awaits the next push event from the held subscription.
    ///
    /// Returns `None` if not subscribed (never loaded, or closed) or
    /// once the backend side is gone. The caller's event loop feeds the
    /// result to [`apply_change`](Self::apply_change).
    pub async fn next_change(&mut self) -> Option<ChangeEvent> {
        match self.subscription.as_mut() {
            Some(subscription) => subscription.next().await,
            None => None,
        }
    }

    /// Releases the change subscription. After this, no event can reach
    /// the collection; dropping the collection has the same effect.
    pub fn close(&mut self) {
        self.subscription = None;
    }
}
