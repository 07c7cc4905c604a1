//! Property-based tests for the comparator engine.
//!
//! Uses proptest to verify:
//! 1. Every sort key induces an antisymmetric, transitive comparison.
//! 2. `sort_tasks` output is a permutation of its input and is ordered
//!    under the active comparator.
//! 3. The manual key produces the same output in both directions.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::cmp::Ordering;

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use taskdeck_core::sort::{SortDirection, SortKey, compare, sort_tasks};
use taskdeck_core::task::{Category, Priority, Task, TaskId};
use uuid::Uuid;

// --- Arbitrary strategies for tasks ---

/// Strategy for timestamps in a small fixed window so ties are likely.
fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..10_000).prop_map(|secs| {
        Utc.timestamp_opt(1_700_000_000 + secs, 0)
            .single()
            .expect("in range")
    })
}

/// Strategy for arbitrary categories.
fn arb_category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Work),
        Just(Category::Personal),
        Just(Category::Urgent),
        Just(Category::Other),
    ]
}

/// Strategy for optional priorities (absence is a real case).
fn arb_priority() -> impl Strategy<Value = Option<Priority>> {
    prop_oneof![
        Just(None),
        Just(Some(Priority::Low)),
        Just(Some(Priority::Medium)),
        Just(Some(Priority::High)),
    ]
}

/// Strategy for arbitrary tasks. Titles draw from a tiny alphabet with
/// mixed case so case-insensitive ties actually occur.
fn arb_task() -> impl Strategy<Value = Task> {
    (
        any::<u128>(),
        "[aAbB]{1,6}",
        arb_category(),
        any::<bool>(),
        -50i64..50,
        arb_priority(),
        prop::option::of(arb_timestamp()),
        arb_timestamp(),
        arb_timestamp(),
    )
        .prop_map(
            |(id, title, category, completed, order, priority, due_date, created, updated)| Task {
                id: TaskId::from_uuid(Uuid::from_u128(id)),
                title,
                description: String::new(),
                category,
                completed,
                order,
                priority,
                due_date,
                created,
                updated,
            },
        )
}

const ALL_KEYS: [SortKey; 7] = [
    SortKey::Manual,
    SortKey::Created,
    SortKey::Updated,
    SortKey::Title,
    SortKey::Completed,
    SortKey::Priority,
    SortKey::DueDate,
];

fn arb_key() -> impl Strategy<Value = SortKey> {
    prop::sample::select(ALL_KEYS.as_slice())
}

proptest! {
    #[test]
    fn compare_is_antisymmetric(a in arb_task(), b in arb_task(), key in arb_key()) {
        prop_assert_eq!(compare(&a, &b, key), compare(&b, &a, key).reverse());
    }

    #[test]
    fn compare_is_reflexive(a in arb_task(), key in arb_key()) {
        prop_assert_eq!(compare(&a, &a, key), Ordering::Equal);
    }

    #[test]
    fn compare_is_transitive(
        a in arb_task(),
        b in arb_task(),
        c in arb_task(),
        key in arb_key(),
    ) {
        if compare(&a, &b, key) != Ordering::Greater
            && compare(&b, &c, key) != Ordering::Greater
        {
            prop_assert_ne!(compare(&a, &c, key), Ordering::Greater);
        }
    }

    #[test]
    fn sorted_output_is_ordered_and_a_permutation(
        tasks in prop::collection::vec(arb_task(), 0..20),
        key in arb_key(),
    ) {
        let sorted = sort_tasks(&tasks, key, SortDirection::Ascending);
        prop_assert_eq!(sorted.len(), tasks.len());

        for pair in sorted.windows(2) {
            prop_assert_ne!(compare(&pair[0], &pair[1], key), Ordering::Greater);
        }

        let mut input_ids: Vec<_> = tasks.iter().map(|t| t.id.clone()).collect();
        let mut output_ids: Vec<_> = sorted.iter().map(|t| t.id.clone()).collect();
        input_ids.sort_by_key(|id| *id.as_uuid());
        output_ids.sort_by_key(|id| *id.as_uuid());
        prop_assert_eq!(input_ids, output_ids);
    }

    #[test]
    fn descending_is_the_exact_reverse_for_strict_orders(
        tasks in prop::collection::vec(arb_task(), 0..20),
        key in arb_key(),
    ) {
        let desc = sort_tasks(&tasks, key, SortDirection::Descending);
        for pair in desc.windows(2) {
            let forbidden = if key == SortKey::Manual {
                // Manual ignores direction entirely, so it stays ascending.
                Ordering::Greater
            } else {
                Ordering::Less
            };
            prop_assert_ne!(compare(&pair[0], &pair[1], key), forbidden);
        }
    }

    #[test]
    fn manual_ignores_direction(tasks in prop::collection::vec(arb_task(), 0..20)) {
        let asc = sort_tasks(&tasks, SortKey::Manual, SortDirection::Ascending);
        let desc = sort_tasks(&tasks, SortKey::Manual, SortDirection::Descending);
        prop_assert_eq!(asc, desc);
    }
}
