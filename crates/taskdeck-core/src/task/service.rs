//! Remote task service trait.
//!
//! Defines the boundary between the task domain and the remote CRUD service.

use super::model::{Tag, TagId, Task, TaskDraft, TaskId, TaskPatch};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract client for the remote task service.
///
/// Every method is a single network round trip (paged listing aside) and
/// returns the server's representation, never a locally computed one.
///
/// # Implementation Notes
///
/// Implementations should:
/// - Attach the current session token to each request when one is present
/// - Reject blank titles, sub-task texts, and tag names before sending
/// - Map a 404 to `TaskdeckError::NotFound`, rejected payloads to
///   `TaskdeckError::Validation`, and everything else to `TaskdeckError::Service`
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Lists every task visible to the current session.
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// Fetches a single task.
    ///
    /// # Returns
    ///
    /// - `Ok(Task)`: The server's current representation
    /// - `Err(TaskdeckError::NotFound)`: Unknown id
    async fn get_task(&self, id: TaskId) -> Result<Task>;

    /// Creates a task and returns it with its server-assigned id.
    async fn create_task(&self, draft: &TaskDraft) -> Result<Task>;

    /// Applies a partial update. Fields left as `None` are unchanged server-side.
    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<Task>;

    /// Deletes a task. Deleting an already-deleted id is `NotFound`.
    async fn delete_task(&self, id: TaskId) -> Result<()>;

    /// Appends a sub-task and returns the full updated parent.
    async fn add_subtask(&self, task_id: TaskId, text: &str) -> Result<Task>;

    /// Attaches a tag by name. The server does not return the task.
    async fn add_tag(&self, task_id: TaskId, name: &str) -> Result<()>;

    /// Detaches a tag from a task.
    async fn remove_tag(&self, task_id: TaskId, tag_id: TagId) -> Result<()>;

    /// Lists the tasks carrying a tag with this exact name.
    async fn tasks_by_tag(&self, name: &str) -> Result<Vec<Task>>;
}

/// Collapses duplicate tag ids, keeping the first occurrence.
///
/// Tags are a set by id; a server join can repeat a row.
pub fn dedup_tags(tags: Vec<Tag>) -> Vec<Tag> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter().filter(|tag| seen.insert(tag.id)).collect()
}

/// Collapses duplicate task ids, keeping the first occurrence.
///
/// Offset paging over an unordered listing can return a row on two pages.
pub fn dedup_tasks(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = std::collections::HashSet::new();
    tasks.into_iter().filter(|task| seen.insert(task.id)).collect()
}
