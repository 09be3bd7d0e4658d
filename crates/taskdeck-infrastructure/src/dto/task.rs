//! Task DTOs and domain conversions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use taskdeck_core::error::{Result, TaskdeckError};
use taskdeck_core::task::{
    Category, Priority, Stage, SubTask, Tag, Task, TaskDraft, TaskPatch, dedup_tags,
};

/// The server stores due dates as naive datetimes; only the date is meaningful.
const DUE_DATE_WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A task as returned by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskDto {
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub stage: Stage,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub subtasks: Vec<SubTaskDto>,
    #[serde(default)]
    pub tags: Vec<TagDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubTaskDto {
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagDto {
    pub id: i64,
    pub name: String,
}

/// Body of `POST /todos`.
#[derive(Debug, Serialize)]
pub struct CreateTaskRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Category,
    pub priority: Priority,
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Body of `PUT /todos/{id}`. Absent fields are left unchanged; an explicit
/// `null` clears a nullable field.
#[derive(Debug, Serialize)]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<String>>,
}

/// Body of `POST /todos/{id}/subtasks`.
#[derive(Debug, Serialize)]
pub struct SubTaskRequest<'a> {
    pub text: &'a str,
    pub completed: bool,
}

/// Body of `POST /todos/{id}/tags`.
#[derive(Debug, Serialize)]
pub struct TagRequest<'a> {
    pub name: &'a str,
}

// ============================================================================
// Due date encoding
// ============================================================================

fn encode_due_date(date: NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .format(DUE_DATE_WIRE_FORMAT)
        .to_string()
}

/// Accepts a bare date or a datetime and keeps the date part.
fn decode_due_date(raw: &str) -> Result<NaiveDate> {
    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| TaskdeckError::Serialization {
        format: "JSON".to_string(),
        message: format!("invalid due_date '{raw}': {e}"),
    })
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl TryFrom<TaskDto> for Task {
    type Error = TaskdeckError;

    fn try_from(dto: TaskDto) -> Result<Self> {
        let due_date = match dto.due_date.as_deref() {
            Some(raw) if !raw.is_empty() => Some(decode_due_date(raw)?),
            _ => None,
        };

        Ok(Task {
            id: dto.id,
            title: dto.text,
            description: dto.description,
            completed: dto.completed,
            category: dto.category,
            priority: dto.priority,
            stage: dto.stage,
            due_date,
            subtasks: dto
                .subtasks
                .into_iter()
                .map(|s| SubTask {
                    id: s.id,
                    text: s.text,
                    completed: s.completed,
                })
                .collect(),
            tags: dedup_tags(
                dto.tags
                    .into_iter()
                    .map(|t| Tag { id: t.id, name: t.name })
                    .collect(),
            ),
        })
    }
}

impl From<&TaskDraft> for CreateTaskRequest {
    fn from(draft: &TaskDraft) -> Self {
        Self {
            text: draft.title.clone(),
            description: draft.description.clone(),
            category: draft.category,
            priority: draft.priority,
            stage: draft.stage,
            due_date: draft.due_date.map(encode_due_date),
        }
    }
}

impl From<&TaskPatch> for UpdateTaskRequest {
    fn from(patch: &TaskPatch) -> Self {
        Self {
            text: patch.title.clone(),
            description: patch.description.clone(),
            completed: patch.completed,
            category: patch.category,
            priority: patch.priority,
            stage: patch.stage,
            due_date: patch.due_date.map(|d| d.map(encode_due_date)),
        }
    }
}

/// Decodes a list of server tasks, failing on the first malformed entry.
pub fn into_tasks(dtos: Vec<TaskDto>) -> Result<Vec<Task>> {
    dtos.into_iter().map(Task::try_from).collect()
}
