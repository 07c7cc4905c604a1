//! In-memory reference backend for Taskdeck.
//!
//! [`MemoryStore`] implements the full [`RemoteStore`] contract: it owns
//! the record list, assigns ids and timestamps, validates input
//! server-side, and pushes a [`ChangeEvent`] to every live subscriber
//! for each successful write — including the writer's own, which is what
//! the client collection relies on as its update path.
//!
//! `set_unavailable` simulates backend connectivity loss so every
//! failure path of a consumer can be exercised.

use chrono::Utc;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;

use taskdeck_core::remote::{
    ChangeAction, ChangeEvent, RemoteError, RemoteStore, SortHint, Subscription,
};
use taskdeck_core::task::{
    CreateTaskData, DESCRIPTION_MAX_LENGTH, Task, TaskId, TaskPatch, TITLE_MAX_LENGTH,
    TITLE_MIN_LENGTH,
};

/// Capacity of the change-event fan-out channel per store.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// An in-memory task backend with change-event fan-out.
///
/// The record list is guarded by a [`RwLock`] that is never held across
/// an await point; events go out through a [`broadcast`] channel so
/// every subscriber sees every change.
pub struct MemoryStore {
    records: RwLock<Vec<Task>>,
    events: broadcast::Sender<ChangeEvent>,
    unavailable: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            records: RwLock::new(Vec::new()),
            events,
            unavailable: AtomicBool::new(false),
        }
    }

    /// Simulates connectivity loss: while set, every operation fails
    /// with [`RemoteError::Network`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of records currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True when the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn check_available(&self) -> Result<(), RemoteError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RemoteError::Network("backend unavailable".to_string()));
        }
        Ok(())
    }

    fn validate(data: &CreateTaskData) -> Result<(), RemoteError> {
        let title_len = data.title.chars().count();
        if title_len < TITLE_MIN_LENGTH {
            return Err(RemoteError::Validation(format!(
                "title must be at least {TITLE_MIN_LENGTH} characters"
            )));
        }
        if title_len > TITLE_MAX_LENGTH {
            return Err(RemoteError::Validation(format!(
                "title must be at most {TITLE_MAX_LENGTH} characters"
            )));
        }
        if data.description.chars().count() > DESCRIPTION_MAX_LENGTH {
            return Err(RemoteError::Validation(format!(
                "description must be at most {DESCRIPTION_MAX_LENGTH} characters"
            )));
        }
        Ok(())
    }

    fn publish(&self, action: ChangeAction, record: Task) {
        // No live subscribers is fine; events are fan-out only.
        if self.events.send(ChangeEvent { action, record }).is_err() {
            tracing::trace!("change event dropped: no subscribers");
        }
    }
}

impl RemoteStore for MemoryStore {
    async fn list_all(&self, hint: SortHint) -> Result<Vec<Task>, RemoteError> {
        self.check_available()?;
        let mut tasks = self.records.read().clone();
        tasks.sort_by(|a, b| hint.compare(a, b));
        Ok(tasks)
    }

    async fn create(&self, data: CreateTaskData) -> Result<Task, RemoteError> {
        self.check_available()?;
        Self::validate(&data)?;

        let now = Utc::now();
        let task = Task {
            id: TaskId::new(),
            title: data.title,
            description: data.description,
            category: data.category,
            completed: data.completed,
            order: data.order,
            priority: data.priority,
            due_date: data.due_date,
            created: now,
            updated: now,
        };
        self.records.write().push(task.clone());
        tracing::debug!(id = %task.id, "task created");
        self.publish(ChangeAction::Create, task.clone());
        Ok(task)
    }

    async fn update(&self, id: &TaskId, patch: TaskPatch) -> Result<Task, RemoteError> {
        self.check_available()?;
        let updated = {
            let mut records = self.records.write();
            let task = records
                .iter_mut()
                .find(|t| t.id == *id)
                .ok_or_else(|| RemoteError::NotFound(id.clone()))?;
            patch.apply_to(task);
            task.updated = Utc::now();
            task.clone()
        };
        tracing::debug!(id = %id, "task updated");
        self.publish(ChangeAction::Update, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: &TaskId) -> Result<(), RemoteError> {
        self.check_available()?;
        let removed = {
            let mut records = self.records.write();
            let position = records
                .iter()
                .position(|t| t.id == *id)
                .ok_or_else(|| RemoteError::NotFound(id.clone()))?;
            records.remove(position)
        };
        tracing::debug!(id = %id, "task deleted");
        self.publish(ChangeAction::Delete, removed);
        Ok(())
    }

    fn subscribe_all(&self) -> Subscription {
        Subscription::new(self.events.subscribe())
    }
}
