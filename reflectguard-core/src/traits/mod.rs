//! Shared trait seams used across the workspace.

pub mod observer;

pub use observer::{NullObserver, QueryObserver, QueryOutcome};
