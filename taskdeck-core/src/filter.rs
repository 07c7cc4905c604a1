//! Filter engine: pure predicate combination over the task collection.
//!
//! A [`TaskFilter`] ANDs three independent predicates (category,
//! priority, free-text query). Matching is side-effect-free and
//! re-derivable on every change to the task set or the filter inputs.

use serde::{Deserialize, Serialize};

use crate::task::{Category, Priority, Task};

/// Category predicate: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    /// Every category passes.
    #[default]
    All,
    /// Only the given category passes.
    Only(Category),
}

impl CategoryFilter {
    fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => task.category == category,
        }
    }
}

/// Priority predicate: everything, or one priority.
///
/// A task with no priority only passes `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFilter {
    /// Every priority (including none) passes.
    #[default]
    All,
    /// Only the given priority passes.
    Only(Priority),
}

impl PriorityFilter {
    fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(priority) => task.priority == Some(priority),
        }
    }
}

/// Active filter state: category, priority, and free-text query,
/// combined with logical AND.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskFilter {
    /// Category predicate.
    pub category: CategoryFilter,
    /// Priority predicate.
    pub priority: PriorityFilter,
    /// Free-text query; empty matches everything. Matching is a
    /// case-insensitive substring check against title or description.
    pub query: String,
}

impl TaskFilter {
    /// Returns true iff the task passes all three predicates.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.category.matches(task) && self.priority.matches(task) && self.query_matches(task)
    }

    fn query_matches(&self, task: &Task) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let query = self.query.to_lowercase();
        task.title.to_lowercase().contains(&query)
            || task.description.to_lowercase().contains(&query)
    }
}
