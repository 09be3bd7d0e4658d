//! Task domain module.
//!
//! This module contains the task domain models and the interface to the
//! remote service that owns them.
//!
//! # Module Structure
//!
//! - `model`: `Task`, `SubTask`, `Tag`, the classification enums, and the
//!   `TaskDraft` / `TaskPatch` / `TaskEdit` value objects
//! - `service`: `TaskService` trait for the remote CRUD service
//!
//! # Usage
//!
//! ```ignore
//! use taskdeck_core::task::{Task, TaskDraft, Category, Stage};
//! use taskdeck_core::task::TaskService;
//! ```

mod model;
pub mod service;

// Re-export public API
pub use model::{
    Category, Priority, Stage, SubTask, SubTaskId, Tag, TagId, Task, TaskDraft, TaskEdit, TaskId,
    TaskPatch, require_text,
};

pub use service::{TaskService, dedup_tags, dedup_tasks};
