//! Task domain model.
//!
//! This module contains the Task entity, its owned sub-entities, and the value
//! objects used to create and modify tasks through the remote service.

use crate::error::{Result, TaskdeckError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Server-assigned task identifier.
pub type TaskId = i64;
/// Server-assigned sub-task identifier.
pub type SubTaskId = i64;
/// Server-assigned tag identifier.
pub type TagId = i64;

/// The area of life a task belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    Work,
    Personal,
    Shopping,
    Health,
    #[default]
    Other,
}

/// Task urgency. Declaration order is the total order `Low < Medium < High`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Workflow position of a task on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Stage {
    /// The stage a task moves to when its completion flag becomes `completed`.
    ///
    /// Completing forces `Done`; re-opening resets to `Todo`.
    pub fn for_completion(completed: bool) -> Self {
        if completed { Stage::Done } else { Stage::Todo }
    }
}

/// A checklist item owned by exactly one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: SubTaskId,
    pub text: String,
    pub completed: bool,
}

/// A label attached to a task. Name case is kept as provided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// A user-managed work item.
///
/// Instances are only ever built from a server response; the client never
/// fabricates an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier, immutable after creation.
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub category: Category,
    pub priority: Priority,
    pub stage: Stage,
    /// Calendar date without a time component.
    pub due_date: Option<NaiveDate>,
    /// Insertion order as returned by the server.
    pub subtasks: Vec<SubTask>,
    /// Unique by id; order carries no meaning.
    pub tags: Vec<Tag>,
}

impl Task {
    /// Returns true if a tag with exactly this name is attached.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name == name)
    }

    /// Number of completed sub-tasks.
    pub fn completed_subtasks(&self) -> usize {
        self.subtasks.iter().filter(|s| s.completed).count()
    }
}

/// Payload for creating a task. The server assigns id and completion state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub priority: Priority,
    pub stage: Stage,
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    /// Creates a draft with medium priority in the `todo` stage.
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            description: None,
            category,
            priority: Priority::default(),
            stage: Stage::default(),
            due_date: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns a trimmed copy, rejecting a blank title.
    ///
    /// A description that is blank after trimming is dropped.
    pub fn normalized(&self) -> Result<Self> {
        let title = require_text("title", &self.title)?;
        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(Self {
            title,
            description,
            ..self.clone()
        })
    }
}

/// A partial update sent to the remote service.
///
/// `None` leaves a field unchanged server-side. For the nullable fields,
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub stage: Option<Stage>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    /// The patch applied by the completion toggle: the flag and its coupled stage.
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            stage: Some(Stage::for_completion(completed)),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns a trimmed copy, rejecting a title that is present but blank.
    pub fn normalized(&self) -> Result<Self> {
        let title = match &self.title {
            Some(title) => Some(require_text("title", title)?),
            None => None,
        };
        Ok(Self {
            title,
            ..self.clone()
        })
    }
}

/// A user edit of a task's classification and content.
///
/// Unlike [`TaskPatch`] this has no completion flag: editing the stage never
/// touches `completed`, and only the completion toggle couples the two.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub stage: Option<Stage>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskEdit {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<TaskEdit> for TaskPatch {
    fn from(edit: TaskEdit) -> Self {
        Self {
            title: edit.title,
            description: edit.description,
            completed: None,
            category: edit.category,
            priority: edit.priority,
            stage: edit.stage,
            due_date: edit.due_date,
        }
    }
}

/// Trims `value` and rejects it if nothing is left.
pub fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskdeckError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}
