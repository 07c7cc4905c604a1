//! End-to-end view tests: collection state flowing through the filter
//! and comparator engines into the rendered list, across live updates.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use chrono::Utc;
use taskdeck::{Notifier, TaskCollection};
use taskdeck_core::filter::{CategoryFilter, PriorityFilter, TaskFilter};
use taskdeck_core::sort::{SortDirection, SortKey, SortState, select_view};
use taskdeck_core::task::{Category, CreateTaskData, Priority, TaskPatch, TaskStats};
use taskdeck_memstore::MemoryStore;

async fn make_loaded() -> (Arc<MemoryStore>, TaskCollection<MemoryStore>) {
    let backend = Arc::new(MemoryStore::new());
    let (notifier, rx) = Notifier::channel();
    drop(rx);
    let mut collection = TaskCollection::new(Arc::clone(&backend), notifier);
    collection.load().await;
    (backend, collection)
}

async fn pump(collection: &mut TaskCollection<MemoryStore>, count: usize) {
    for _ in 0..count {
        let event = collection.next_change().await.expect("event pending");
        collection.apply_change(event);
    }
}

#[tokio::test]
async fn search_narrows_then_update_drops_from_completed_view() {
    let (_backend, mut collection) = make_loaded().await;
    let mut milk = CreateTaskData::new("Buy milk", Category::Personal);
    milk.order = 0;
    let mut rent = CreateTaskData::new("Pay rent", Category::Personal);
    rent.order = 1;
    collection.create(milk).await.unwrap();
    collection.create(rent).await.unwrap();
    pump(&mut collection, 2).await;

    let filter = TaskFilter {
        query: "milk".to_string(),
        ..TaskFilter::default()
    };
    let view = select_view(
        collection.tasks(),
        &filter,
        SortKey::Manual,
        SortDirection::Ascending,
    );
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].title, "Buy milk");
    let milk_id = view[0].id.clone();
    let milk_order = view[0].order;

    // Complete the matching task; reconciliation happens via the echo.
    collection
        .update(&milk_id, TaskPatch::completed(true))
        .await
        .unwrap();
    pump(&mut collection, 1).await;

    // Same filter, now sorted by completion: the task still matches the
    // search but its record changed in place.
    let view = select_view(
        collection.tasks(),
        &filter,
        SortKey::Completed,
        SortDirection::Ascending,
    );
    assert_eq!(view.len(), 1);
    assert!(view[0].completed);
    assert_eq!(view[0].id, milk_id, "id preserved across the echo");
    assert_eq!(view[0].order, milk_order, "order preserved across the echo");

    // Narrow further: a completed-only mismatch would come from the
    // filter, not the sort — searching for something absent yields [].
    let no_match = TaskFilter {
        query: "water".to_string(),
        ..TaskFilter::default()
    };
    let view = select_view(
        collection.tasks(),
        &no_match,
        SortKey::Completed,
        SortDirection::Ascending,
    );
    assert!(view.is_empty());
}

#[tokio::test]
async fn category_and_priority_filters_and_sorts_compose() {
    let (_backend, mut collection) = make_loaded().await;
    let mut report = CreateTaskData::new("Quarterly report", Category::Work);
    report.priority = Some(Priority::High);
    let mut email = CreateTaskData::new("Answer email", Category::Work);
    email.priority = Some(Priority::Low);
    let mut groceries = CreateTaskData::new("Groceries", Category::Personal);
    groceries.priority = Some(Priority::High);
    collection.create(report).await.unwrap();
    collection.create(email).await.unwrap();
    collection.create(groceries).await.unwrap();
    pump(&mut collection, 3).await;

    let work_only = TaskFilter {
        category: CategoryFilter::Only(Category::Work),
        ..TaskFilter::default()
    };
    let view = select_view(
        collection.tasks(),
        &work_only,
        SortKey::Priority,
        SortDirection::Descending,
    );
    assert_eq!(view.len(), 2);
    assert_eq!(view[0].title, "Quarterly report");
    assert_eq!(view[1].title, "Answer email");

    // AND semantics: category passes, priority does not.
    let work_high = TaskFilter {
        category: CategoryFilter::Only(Category::Work),
        priority: PriorityFilter::Only(Priority::High),
        ..TaskFilter::default()
    };
    let view = select_view(
        collection.tasks(),
        &work_high,
        SortKey::Manual,
        SortDirection::Ascending,
    );
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].title, "Quarterly report");
}

#[tokio::test]
async fn sort_state_drives_the_view_through_reselection() {
    let (_backend, mut collection) = make_loaded().await;
    let mut beta = CreateTaskData::new("beta", Category::Other);
    beta.order = 0;
    let mut alpha = CreateTaskData::new("Alpha", Category::Other);
    alpha.order = 1;
    collection.create(beta).await.unwrap();
    collection.create(alpha).await.unwrap();
    pump(&mut collection, 2).await;

    let mut sort = SortState::default();
    assert!(sort.is_manual());
    let filter = TaskFilter::default();

    let view = select_view(collection.tasks(), &filter, sort.key, sort.direction);
    assert_eq!(view[0].title, "beta", "manual default follows order field");

    sort.select(SortKey::Title);
    let view = select_view(collection.tasks(), &filter, sort.key, sort.direction);
    assert_eq!(view[0].title, "Alpha", "title sort is case-insensitive");

    sort.select(SortKey::Title);
    let view = select_view(collection.tasks(), &filter, sort.key, sort.direction);
    assert_eq!(view[0].title, "beta", "reselecting flips direction");

    sort.select(SortKey::Manual);
    assert!(sort.is_manual());
    let view = select_view(collection.tasks(), &filter, sort.key, sort.direction);
    assert_eq!(view[0].title, "beta");
}

#[tokio::test]
async fn stats_follow_live_changes() {
    let (_backend, mut collection) = make_loaded().await;
    let mut overdue = CreateTaskData::new("Overdue", Category::Work);
    overdue.due_date = Some(Utc::now() - chrono::Duration::hours(1));
    collection.create(overdue).await.unwrap();
    collection
        .create(CreateTaskData::new("Open", Category::Work))
        .await
        .unwrap();
    pump(&mut collection, 2).await;

    let stats = TaskStats::collect(collection.tasks(), Utc::now());
    assert_eq!(stats.total, 2);
    assert_eq!(stats.active, 2);
    assert_eq!(stats.overdue, 1);

    let id = collection.tasks()[0].id.clone();
    collection.update(&id, TaskPatch::completed(true)).await.unwrap();
    pump(&mut collection, 1).await;

    let stats = TaskStats::collect(collection.tasks(), Utc::now());
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.active, 1);
    assert_eq!(stats.overdue, 0, "completing clears overdue");
}
