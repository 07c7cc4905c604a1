//! Comparator engine: total orders over tasks per sort key.
//!
//! [`compare`] maps a sort key to a pure comparison between two tasks;
//! [`sort_tasks`] applies it as a stable sort with uniform direction
//! inversion. The manual key is the one exception: it always orders by
//! the stored `order` field ascending and never honors direction.
//!
//! [`SortState`] is the selection state machine the UI drives: picking
//! the active key again flips direction, picking a new key resets to
//! that key's default direction.

use std::cmp::Ordering;

use crate::filter::TaskFilter;
use crate::task::Task;

/// Sort criterion over the task collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// User-controlled ordering by the stored `order` field. The default
    /// baseline; always ascending.
    Manual,
    /// Creation timestamp.
    Created,
    /// Last-mutation timestamp.
    Updated,
    /// Case-insensitive alphabetical by title.
    Title,
    /// Incomplete before completed, ties by creation time.
    Completed,
    /// Priority rank (absent priority ranks lowest).
    Priority,
    /// Due date, undated tasks always last, ties by creation time.
    DueDate,
}

impl SortKey {
    /// Direction a freshly selected key starts in.
    ///
    /// `Completed` and `Priority` start descending (completed-first and
    /// most-important-first are the natural views); everything else
    /// starts ascending.
    #[must_use]
    pub const fn default_direction(self) -> SortDirection {
        match self {
            Self::Completed | Self::Priority => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Title => write!(f, "title"),
            Self::Completed => write!(f, "completed"),
            Self::Priority => write!(f, "priority"),
            Self::DueDate => write!(f, "due_date"),
        }
    }
}

/// Direction applied uniformly after comparison (except for
/// [`SortKey::Manual`], which ignores it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Compares two tasks under the given key, ascending.
///
/// Ties (`Ordering::Equal`) are left to the stable sort, so equal tasks
/// keep their relative input order.
#[must_use]
pub fn compare(a: &Task, b: &Task, key: SortKey) -> Ordering {
    match key {
        SortKey::Manual => a.order.cmp(&b.order),
        SortKey::Created => a.created.cmp(&b.created),
        SortKey::Updated => a.updated.cmp(&b.updated),
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::Completed => a
            .completed
            .cmp(&b.completed)
            .then_with(|| a.created.cmp(&b.created)),
        SortKey::Priority => priority_rank(a).cmp(&priority_rank(b)),
        SortKey::DueDate => match (a.due_date, b.due_date) {
            (None, None) => a.created.cmp(&b.created),
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(da), Some(db)) => da.cmp(&db),
        },
    }
}

/// Numeric priority rank with absence treated as lowest.
fn priority_rank(task: &Task) -> u8 {
    task.priority.map_or(1, crate::task::Priority::rank)
}

/// Returns a sorted copy of `tasks` under `key` and `direction`.
///
/// The sort is stable over the full input. `Descending` reverses the
/// comparison uniformly; the manual key ignores `direction` and always
/// orders ascending by the stored `order` field.
#[must_use]
pub fn sort_tasks(tasks: &[Task], key: SortKey, direction: SortDirection) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    if key == SortKey::Manual {
        sorted.sort_by(|a, b| a.order.cmp(&b.order));
        return sorted;
    }
    sorted.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}

/// Filters then sorts: the list the rendering layer consumes.
#[must_use]
pub fn select_view(
    tasks: &[Task],
    filter: &TaskFilter,
    key: SortKey,
    direction: SortDirection,
) -> Vec<Task> {
    let matching: Vec<Task> = tasks.iter().filter(|t| filter.matches(t)).cloned().collect();
    sort_tasks(&matching, key, direction)
}

/// Sort-selection state: the active key and direction, with the
/// repeated-click transition made explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    /// Active sort key.
    pub key: SortKey,
    /// Active direction (meaningless while `key` is manual).
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Manual,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortState {
    /// Applies a key selection.
    ///
    /// Selecting the active key again flips direction; selecting a new
    /// key resets to that key's default direction. Manual never toggles:
    /// it has no direction control and stays ascending.
    pub fn select(&mut self, key: SortKey) {
        if key == self.key && key != SortKey::Manual {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = key.default_direction();
        }
    }

    /// True while manual ordering is active; drag-reorder is only
    /// meaningful then.
    #[must_use]
    pub fn is_manual(&self) -> bool {
        self.key == SortKey::Manual
    }
}
