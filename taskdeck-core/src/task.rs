//! Task entity model for Taskdeck.
//!
//! Defines the canonical task record shape shared by the client collection
//! and backends, the creation/patch payloads, and the derived predicates
//! (`is_overdue`) and collection stats. The entity carries no behavior
//! beyond pure computation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum allowed task title length in characters.
///
/// Enforced at the input boundary (and by backends), never by the
/// client collection itself.
pub const TITLE_MIN_LENGTH: usize = 3;

/// Maximum allowed task title length in characters.
pub const TITLE_MAX_LENGTH: usize = 50;

/// Maximum allowed task description length in characters.
pub const DESCRIPTION_MAX_LENGTH: usize = 200;

/// Unique identifier for a task, based on UUID v7 for time-ordering.
///
/// Ids are assigned by the remote store at creation time and are
/// immutable for the task's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new time-ordered task identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `TaskId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed category enumeration for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Work-related task.
    Work,
    /// Personal task.
    Personal,
    /// Urgent task.
    Urgent,
    /// Anything else.
    Other,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Work => write!(f, "work"),
            Self::Personal => write!(f, "personal"),
            Self::Urgent => write!(f, "urgent"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Task priority. Absence of a priority is treated as lowest
/// priority for ordering purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// Numeric rank used by the comparator engine: low 1, medium 2, high 3.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// The core task entity.
///
/// `id`, `created`, and `updated` are owned by the remote store: `id` and
/// `created` are immutable, `updated` is bumped on every mutation. `order`
/// is the manual-sort position; values are not guaranteed unique or
/// contiguous, only their relative order matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned by the remote store.
    pub id: TaskId,
    /// Short title (3-50 characters at the input boundary).
    pub title: String,
    /// Longer free text, possibly empty (up to 200 characters).
    #[serde(default)]
    pub description: String,
    /// Closed category.
    pub category: Category,
    /// Completion flag.
    #[serde(default)]
    pub completed: bool,
    /// Manual-sort position.
    #[serde(default)]
    pub order: i64,
    /// Optional priority; `None` ranks lowest.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Optional deadline; `None` means no deadline.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp, set by the remote store.
    pub created: DateTime<Utc>,
    /// Last-mutation timestamp, bumped by the remote store.
    pub updated: DateTime<Utc>,
}

impl Task {
    /// Returns true iff the task is incomplete, has a due date, and that
    /// due date is in the past relative to `now`.
    ///
    /// Derived on demand, never stored.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }
}

/// Payload for creating a task: a [`Task`] minus the store-owned fields
/// (`id`, `created`, `updated`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskData {
    /// Task title.
    pub title: String,
    /// Task description, empty by default.
    #[serde(default)]
    pub description: String,
    /// Task category.
    pub category: Category,
    /// Completion flag, false by default.
    #[serde(default)]
    pub completed: bool,
    /// Manual-sort position, 0 by default.
    #[serde(default)]
    pub order: i64,
    /// Optional priority.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Optional deadline.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl CreateTaskData {
    /// Creates a payload with the given title and category and the
    /// defaults for everything else (`completed` false, `order` 0,
    /// empty description, no priority, no due date).
    #[must_use]
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category,
            completed: false,
            order: 0,
            priority: None,
            due_date: None,
        }
    }
}

/// Partial update to a task. Fields left as `None` are untouched.
///
/// `priority` and `due_date` are double-optional so a patch can clear
/// them: `Some(None)` clears, `Some(Some(v))` sets, `None` leaves alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New title, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New category, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// New completion flag, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    /// New manual-sort position, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// New priority (`Some(None)` clears it), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Option<Priority>>,
    /// New due date (`Some(None)` clears it), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    /// A patch that only toggles the completion flag.
    #[must_use]
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// A patch that only moves the task to a new manual-sort position.
    #[must_use]
    pub fn order(order: i64) -> Self {
        Self {
            order: Some(order),
            ..Self::default()
        }
    }

    /// Returns true if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.completed.is_none()
            && self.order.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }

    /// Applies every present field to `task`, leaving the store-owned
    /// fields (`id`, `created`, `updated`) alone.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            task.description.clone_from(description);
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(order) = self.order {
            task.order = order;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
    }
}

/// Derived headline counts over a task collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    /// Every task.
    pub total: usize,
    /// Tasks with `completed` set.
    pub completed: usize,
    /// Tasks without `completed` set.
    pub active: usize,
    /// Incomplete tasks whose due date has passed.
    pub overdue: usize,
}

impl TaskStats {
    /// Computes the counts for `tasks` relative to `now`.
    #[must_use]
    pub fn collect(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total: tasks.len(),
            completed,
            active: tasks.len() - completed,
            overdue: tasks.iter().filter(|t| t.is_overdue(now)).count(),
        }
    }
}
