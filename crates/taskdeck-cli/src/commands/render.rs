//! Plain-text rendering of tasks.

use taskdeck_core::task::Task;

/// One summary line, e.g. `[x] #12 Buy milk (shopping, low, done) due 2025-03-14 #errand`.
pub fn task_line(task: &Task) -> String {
    let mut line = format!(
        "[{}] #{} {} ({}, {}, {})",
        if task.completed { "x" } else { " " },
        task.id,
        task.title,
        task.category,
        task.priority,
        task.stage
    );
    if let Some(due) = task.due_date {
        line.push_str(&format!(" due {}", due.format("%Y-%m-%d")));
    }
    for tag in &task.tags {
        line.push_str(&format!(" #{}", tag.name));
    }
    if !task.subtasks.is_empty() {
        line.push_str(&format!(
            " [{}/{} subtasks]",
            task.completed_subtasks(),
            task.subtasks.len()
        ));
    }
    line
}

/// The summary line followed by description and subtasks, indented.
pub fn task_detail(task: &Task) -> String {
    let mut out = task_line(task);
    if let Some(description) = &task.description {
        out.push_str(&format!("\n    {description}"));
    }
    for subtask in &task.subtasks {
        out.push_str(&format!(
            "\n    - [{}] {}",
            if subtask.completed { "x" } else { " " },
            subtask.text
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use taskdeck_core::task::{Category, Priority, Stage, SubTask, Tag};

    fn task() -> Task {
        Task {
            id: 12,
            title: "Buy milk".into(),
            description: Some("2 liters".into()),
            completed: true,
            category: Category::Shopping,
            priority: Priority::Low,
            stage: Stage::Done,
            due_date: NaiveDate::from_ymd_opt(2025, 3, 14),
            subtasks: vec![
                SubTask {
                    id: 1,
                    text: "oat".into(),
                    completed: true,
                },
                SubTask {
                    id: 2,
                    text: "whole".into(),
                    completed: false,
                },
            ],
            tags: vec![Tag {
                id: 3,
                name: "errand".into(),
            }],
        }
    }

    #[test]
    fn test_task_line() {
        assert_eq!(
            task_line(&task()),
            "[x] #12 Buy milk (shopping, low, done) due 2025-03-14 #errand [1/2 subtasks]"
        );
    }

    #[test]
    fn test_task_detail_lists_subtasks() {
        let detail = task_detail(&task());
        let lines: Vec<&str> = detail.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "    2 liters");
        assert_eq!(lines[3], "    - [ ] whole");
    }
}
