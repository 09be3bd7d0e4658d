//! Human-readable outcome messages for the presentation layer.

use std::fmt;
use strum::{AsRefStr, Display};
use taskdeck_core::error::Result;
use taskdeck_core::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

/// The user-facing operations a notice can report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Load,
    Add,
    Toggle,
    Edit,
    Remove,
    AddSubtask,
    AddTag,
    RemoveTag,
    Login,
    Register,
    Logout,
}

impl Operation {
    fn success_message(self) -> &'static str {
        match self {
            Operation::Load => "Tasks loaded",
            Operation::Add => "Task added",
            Operation::Toggle | Operation::Edit => "Task updated",
            Operation::Remove => "Task deleted",
            Operation::AddSubtask => "Subtask added",
            Operation::AddTag => "Tag added",
            Operation::RemoveTag => "Tag removed",
            Operation::Login => "Logged in",
            Operation::Register => "Registered. You can log in now",
            Operation::Logout => "Logged out",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Operation::Load => "Could not load tasks",
            Operation::Add => "Could not add task",
            Operation::Toggle | Operation::Edit => "Could not update task",
            Operation::Remove => "Could not delete task",
            Operation::AddSubtask => "Could not add subtask",
            Operation::AddTag => "Could not add tag",
            Operation::RemoveTag => "Could not remove tag",
            Operation::Login => "Login failed",
            Operation::Register => "Registration failed",
            Operation::Logout => "Logout failed",
        }
    }
}

/// A one-line notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// Describes the outcome of `operation`. Errors carry their own text.
    pub fn for_result<T>(operation: Operation, result: &Result<T>) -> Self {
        match result {
            Ok(_) => Self::success(operation.success_message()),
            Err(e) => Self::error(format!("{}: {}", operation.failure_message(), e)),
        }
    }

    /// Like [`Notice::for_result`], but says which way the task was toggled.
    pub fn for_toggle(result: &Result<Task>) -> Self {
        match result {
            Ok(task) if task.completed => Self::success("Task completed"),
            Ok(_) => Self::success("Task reopened"),
            Err(_) => Self::for_result(Operation::Toggle, result),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NoticeKind::Success => write!(f, "✓ {}", self.message),
            NoticeKind::Error => write!(f, "✗ {}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_core::TaskdeckError;
    use taskdeck_core::task::{Category, Priority, Stage};

    fn task(completed: bool) -> Task {
        Task {
            id: 1,
            title: "Buy milk".into(),
            description: None,
            completed,
            category: Category::Shopping,
            priority: Priority::Low,
            stage: Stage::for_completion(completed),
            due_date: None,
            subtasks: Vec::new(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_error_notice_includes_cause() {
        let result: Result<()> = Err(TaskdeckError::not_found("task", 9));
        let notice = Notice::for_result(Operation::Remove, &result);
        assert!(notice.is_error());
        assert_eq!(notice.message, "Could not delete task: Entity not found: task '9'");
    }

    #[test]
    fn test_success_notice() {
        let notice = Notice::for_result(Operation::AddTag, &Ok(()));
        assert_eq!(notice, Notice::success("Tag added"));
        assert_eq!(notice.to_string(), "✓ Tag added");
    }

    #[test]
    fn test_toggle_notice_reports_direction() {
        assert_eq!(Notice::for_toggle(&Ok(task(true))).message, "Task completed");
        assert_eq!(Notice::for_toggle(&Ok(task(false))).message, "Task reopened");

        let failed: Result<Task> = Err(TaskdeckError::service(None, "timed out"));
        let notice = Notice::for_toggle(&failed);
        assert!(notice.is_error());
        assert!(notice.message.starts_with("Could not update task"));
    }
}
