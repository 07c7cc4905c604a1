//! Taskdeck — client-side task collection with live backend sync.

pub mod notify;
pub mod store;

pub use notify::{Notice, NoticeKind, Notifier};
pub use store::{LoadState, TaskCollection};
