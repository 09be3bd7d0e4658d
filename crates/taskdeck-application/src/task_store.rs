//! TaskStore - the confirmed task snapshot.
//!
//! Every mutation goes to the remote service first. The snapshot only changes
//! once the service has answered, and then only by taking the server's
//! representation of the affected task. A failed call leaves the snapshot
//! exactly as it was.

use std::sync::Arc;
use taskdeck_core::error::{Result, TaskdeckError};
use taskdeck_core::task::{TagId, Task, TaskDraft, TaskEdit, TaskId, TaskPatch, TaskService};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Snapshot {
    tasks: Vec<Task>,
    loaded: bool,
}

/// Commit-on-confirm store over a [`TaskService`].
///
/// Cloning shares the same snapshot. Readers always see either the state
/// before an operation or the state after its confirmation.
///
/// Concurrent mutations of the same task are not coordinated: whichever
/// response arrives last is the one kept.
#[derive(Clone)]
pub struct TaskStore {
    service: Arc<dyn TaskService>,
    snapshot: Arc<RwLock<Snapshot>>,
}

impl TaskStore {
    pub fn new(service: Arc<dyn TaskService>) -> Self {
        Self {
            service,
            snapshot: Arc::new(RwLock::new(Snapshot::default())),
        }
    }

    /// Replaces the snapshot with the server's full task list.
    ///
    /// # Errors
    ///
    /// `TaskdeckError::Load` wrapping the service failure. The prior snapshot,
    /// possibly empty, is kept.
    pub async fn load(&self) -> Result<()> {
        let tasks = match self.service.list_tasks().await {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!("[TaskStore] Load failed, keeping previous snapshot: {}", e);
                return Err(TaskdeckError::load(e));
            }
        };

        let mut snapshot = self.snapshot.write().await;
        tracing::debug!(
            "[TaskStore] Loaded {} tasks (previously {})",
            tasks.len(),
            snapshot.tasks.len()
        );
        snapshot.tasks = tasks;
        snapshot.loaded = true;
        Ok(())
    }

    /// Creates a task and appends the server's representation.
    pub async fn add(&self, draft: TaskDraft) -> Result<Task> {
        let task = self.service.create_task(&draft).await?;
        self.snapshot.write().await.tasks.push(task.clone());
        tracing::info!("[TaskStore] Added task {} '{}'", task.id, task.title);
        Ok(task)
    }

    /// Flips completion and moves the stage with it (`done` or back to `todo`).
    ///
    /// The current flag is read from the snapshot, so an id that is not
    /// loaded is `NotFound` without contacting the server.
    pub async fn toggle_completion(&self, id: TaskId) -> Result<Task> {
        let completed = self
            .snapshot
            .read()
            .await
            .tasks
            .iter()
            .find(|task| task.id == id)
            .map(|task| task.completed)
            .ok_or_else(|| TaskdeckError::not_found("task", id))?;

        let patch = TaskPatch::completion(!completed);
        let task = self.service.update_task(id, &patch).await?;
        tracing::info!(
            "[TaskStore] Task {} completed={} stage={}",
            id,
            task.completed,
            task.stage
        );
        self.apply_confirmed(task).await
    }

    /// Applies a partial edit. Changing the stage here never touches `completed`.
    ///
    /// # Errors
    ///
    /// `Validation` for an edit with no fields set; nothing is sent.
    pub async fn edit(&self, id: TaskId, edit: TaskEdit) -> Result<Task> {
        if edit.is_empty() {
            return Err(TaskdeckError::validation("edit must change at least one field"));
        }
        let task = self.service.update_task(id, &TaskPatch::from(edit)).await?;
        tracing::info!("[TaskStore] Edited task {}", id);
        self.apply_confirmed(task).await
    }

    /// Deletes a task, dropping it locally once the server confirms.
    pub async fn remove(&self, id: TaskId) -> Result<()> {
        self.service.delete_task(id).await?;
        self.snapshot.write().await.tasks.retain(|task| task.id != id);
        tracing::info!("[TaskStore] Removed task {}", id);
        Ok(())
    }

    pub async fn add_subtask(&self, task_id: TaskId, text: &str) -> Result<Task> {
        let task = self.service.add_subtask(task_id, text).await?;
        tracing::info!("[TaskStore] Added subtask to task {}", task_id);
        self.apply_confirmed(task).await
    }

    /// Attaches a tag, then re-fetches the task since the tag endpoint returns no body.
    ///
    /// If the re-fetch fails the tag is already attached server-side but the
    /// snapshot is unchanged; the next `load` picks it up.
    pub async fn add_tag(&self, task_id: TaskId, name: &str) -> Result<Task> {
        self.service.add_tag(task_id, name).await?;
        tracing::info!("[TaskStore] Tagged task {} with '{}'", task_id, name.trim());
        self.refresh(task_id).await
    }

    /// Detaches a tag, then re-fetches the task.
    pub async fn remove_tag(&self, task_id: TaskId, tag_id: TagId) -> Result<Task> {
        self.service.remove_tag(task_id, tag_id).await?;
        tracing::info!("[TaskStore] Removed tag {} from task {}", tag_id, task_id);
        self.refresh(task_id).await
    }

    /// Asks the server which tasks carry `name`. The snapshot is not consulted or changed.
    pub async fn tasks_by_tag(&self, name: &str) -> Result<Vec<Task>> {
        self.service.tasks_by_tag(name).await
    }

    /// Returns a copy of the confirmed snapshot in display order.
    pub async fn snapshot(&self) -> Vec<Task> {
        self.snapshot.read().await.tasks.clone()
    }

    pub async fn get(&self, id: TaskId) -> Option<Task> {
        self.snapshot
            .read()
            .await
            .tasks
            .iter()
            .find(|task| task.id == id)
            .cloned()
    }

    /// True once a `load` has succeeded, even if it returned no tasks.
    pub async fn is_loaded(&self) -> bool {
        self.snapshot.read().await.loaded
    }

    async fn refresh(&self, task_id: TaskId) -> Result<Task> {
        let task = self.service.get_task(task_id).await?;
        self.apply_confirmed(task).await
    }

    /// Replaces the task with the same id. Tasks not in the snapshot are not inserted.
    async fn apply_confirmed(&self, task: Task) -> Result<Task> {
        let mut snapshot = self.snapshot.write().await;
        match snapshot.tasks.iter_mut().find(|current| current.id == task.id) {
            Some(current) => *current = task.clone(),
            None => tracing::debug!(
                "[TaskStore] Task {} confirmed but not in snapshot, skipping",
                task.id
            ),
        }
        Ok(task)
    }
}
