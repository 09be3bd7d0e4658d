//! Domain layer for Taskdeck.
//!
//! Task and session models, the interfaces to the remote service, and the
//! pure view projections computed from a task snapshot. Nothing here performs
//! I/O; implementations live in `taskdeck-infrastructure`.

pub mod config;
pub mod error;
pub mod session;
pub mod task;
pub mod view;

// Re-export common error type
pub use error::{Result, TaskdeckError};
