//! HttpTaskService - REST implementation of the remote task service.
//!
//! Every request carries the current session token as a bearer credential
//! when one is present. A missing token is not an error here; the server
//! decides what an anonymous caller may do.

use crate::dto::task::into_tasks;
use crate::dto::{CreateTaskRequest, SubTaskRequest, TagRequest, TaskDto, UpdateTaskRequest};
use crate::http_client::ApiClient;
use crate::http_error::RequestTarget;
use async_trait::async_trait;
use reqwest::RequestBuilder;
use taskdeck_core::config::ClientConfig;
use taskdeck_core::error::{Result, TaskdeckError};
use taskdeck_core::session::SessionState;
use taskdeck_core::task::{
    TagId, Task, TaskDraft, TaskId, TaskPatch, TaskService, dedup_tasks, require_text,
};

const TASKS: &str = "todos";

/// Task service that talks to the remote CRUD API.
#[derive(Clone)]
pub struct HttpTaskService {
    api: ApiClient,
    session: SessionState,
    page_size: usize,
}

impl HttpTaskService {
    /// Creates a service reading its bearer token from `session`.
    pub fn new(config: &ClientConfig, session: SessionState) -> Result<Self> {
        if config.page_size == 0 {
            return Err(TaskdeckError::config("page_size must be at least 1"));
        }
        Ok(Self {
            api: ApiClient::new(config)?,
            session,
            page_size: config.page_size,
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token.secret()),
            None => request,
        }
    }

    fn task_url(&self, id: TaskId, rest: &[&str]) -> reqwest::Url {
        let id = id.to_string();
        let mut segments = vec![TASKS, id.as_str()];
        segments.extend_from_slice(rest);
        self.api.url(&segments)
    }

    async fn fetch_task(&self, request: RequestBuilder, action: &str, id: TaskId) -> Result<Task> {
        let dto: TaskDto = self
            .api
            .send_json(self.authorized(request), action, &RequestTarget::new("task", id))
            .await?;
        Task::try_from(dto)
    }
}

#[async_trait]
impl TaskService for HttpTaskService {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let mut tasks = Vec::new();
        let mut skip = 0usize;

        loop {
            let request = self
                .api
                .client()
                .get(self.api.url(&[TASKS]))
                .query(&[("skip", skip), ("limit", self.page_size)]);
            let page: Vec<TaskDto> = self
                .api
                .send_json(self.authorized(request), "list tasks", &RequestTarget::new("task list", "all"))
                .await?;

            let page_len = page.len();
            tasks.extend(into_tasks(page)?);
            if page_len < self.page_size {
                break;
            }
            skip += page_len;
        }

        // Pages are offsets into an unordered listing and may overlap.
        let fetched = tasks.len();
        let tasks = dedup_tasks(tasks);
        if tasks.len() < fetched {
            tracing::debug!(
                "[HttpTaskService] Dropped {} tasks repeated across pages",
                fetched - tasks.len()
            );
        }
        tracing::debug!("[HttpTaskService] Listed {} tasks", tasks.len());
        Ok(tasks)
    }

    async fn get_task(&self, id: TaskId) -> Result<Task> {
        let request = self.api.client().get(self.task_url(id, &[]));
        self.fetch_task(request, "get task", id).await
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
        let draft = draft.normalized()?;
        let request = self
            .api
            .client()
            .post(self.api.url(&[TASKS]))
            .json(&CreateTaskRequest::from(&draft));
        let dto: TaskDto = self
            .api
            .send_json(self.authorized(request), "create task", &RequestTarget::new("task", "new"))
            .await?;
        Task::try_from(dto)
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<Task> {
        let patch = patch.normalized()?;
        let request = self
            .api
            .client()
            .put(self.task_url(id, &[]))
            .json(&UpdateTaskRequest::from(&patch));
        self.fetch_task(request, "update task", id).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        let request = self.api.client().delete(self.task_url(id, &[]));
        self.api
            .send_empty(self.authorized(request), "delete task", &RequestTarget::new("task", id))
            .await
    }

    async fn add_subtask(&self, task_id: TaskId, text: &str) -> Result<Task> {
        let text = require_text("subtask text", text)?;
        let request = self
            .api
            .client()
            .post(self.task_url(task_id, &["subtasks"]))
            .json(&SubTaskRequest {
                text: &text,
                completed: false,
            });
        self.fetch_task(request, "add subtask", task_id).await
    }

    async fn add_tag(&self, task_id: TaskId, name: &str) -> Result<()> {
        let name = require_text("tag name", name)?;
        let request = self
            .api
            .client()
            .post(self.task_url(task_id, &["tags"]))
            .json(&TagRequest { name: &name });
        self.api
            .send_empty(self.authorized(request), "add tag", &RequestTarget::new("task", task_id))
            .await
    }

    async fn remove_tag(&self, task_id: TaskId, tag_id: TagId) -> Result<()> {
        let tag_id = tag_id.to_string();
        let request = self.api.client().delete(self.task_url(task_id, &["tags", &tag_id]));
        self.api
            .send_empty(
                self.authorized(request),
                "remove tag",
                &RequestTarget::new("task tag", format!("{task_id}/{tag_id}")),
            )
            .await
    }

    async fn tasks_by_tag(&self, name: &str) -> Result<Vec<Task>> {
        let name = require_text("tag name", name)?;
        let request = self.api.client().get(self.api.url(&[TASKS, "tags", &name]));
        let dtos: Vec<TaskDto> = self
            .api
            .send_json(self.authorized(request), "list tasks by tag", &RequestTarget::new("tag", &name))
            .await?;
        into_tasks(dtos)
    }
}
