//! Wire DTOs for the remote task service.
//!
//! The server speaks its own field names (`text` for a task's title, naive
//! datetimes for due dates). These types translate between that wire format
//! and the domain models in `taskdeck-core`.

pub mod session;
pub mod task;

pub use session::{LoginForm, TokenResponse};
pub use task::{
    CreateTaskRequest, SubTaskDto, SubTaskRequest, TagDto, TagRequest, TaskDto, UpdateTaskRequest,
};
