//! Shared model and remote contract for Taskdeck.

pub mod filter;
pub mod remote;
pub mod sort;
pub mod task;
