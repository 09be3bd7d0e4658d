//! Application layer for Taskdeck.
//!
//! Coordinates the domain traits into the two stateful components a
//! presentation layer drives: the commit-on-confirm `TaskStore` and the
//! `SessionContext` login lifecycle.

pub mod notice;
pub mod session_context;
pub mod task_store;

pub use notice::{Notice, NoticeKind, Operation};
pub use session_context::SessionContext;
pub use task_store::TaskStore;
