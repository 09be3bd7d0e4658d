use anyhow::Result;
use taskdeck_application::{Notice, Operation};
use taskdeck_core::task::{TagId, Task, TaskDraft, TaskEdit, TaskId};
use taskdeck_core::view::{self, FilterCriterion};

use super::App;
use super::render::{task_detail, task_line};

pub struct ListOptions {
    pub filter: String,
    pub tag: Option<String>,
    pub by_priority: bool,
    pub json: bool,
}

/// Restores the stored session, if any. Commands still run anonymously otherwise.
async fn authenticate(app: &App) {
    if !app.session.restore_session().await.is_authenticated() {
        tracing::debug!("[Cli] No active session, sending requests without a token");
    }
}

/// Restores the session and loads the snapshot. Returns the failure notice, if any.
async fn load(app: &App) -> Option<Notice> {
    authenticate(app).await;
    let result = app.store.load().await;
    result
        .is_err()
        .then(|| Notice::for_result(Operation::Load, &result))
}

fn print_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) {
    let mut empty = true;
    for task in tasks {
        println!("{}", task_line(task));
        empty = false;
    }
    if empty {
        println!("No tasks");
    }
}

pub async fn list(app: &App, options: &ListOptions) -> Result<Option<Notice>> {
    if let Some(notice) = load(app).await {
        return Ok(Some(notice));
    }
    let snapshot = app.store.snapshot().await;

    let mut tasks: Vec<Task> = view::filter_by(&snapshot, FilterCriterion::parse(&options.filter))
        .into_iter()
        .cloned()
        .collect();
    if let Some(tag) = &options.tag {
        tasks = view::filter_by_tag(&tasks, tag).into_iter().cloned().collect();
    }
    if options.by_priority {
        tasks = view::sort_by_priority(&tasks).into_iter().cloned().collect();
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else {
        print_tasks(&tasks);
    }
    Ok(None)
}

pub async fn board(app: &App) -> Result<Option<Notice>> {
    if let Some(notice) = load(app).await {
        return Ok(Some(notice));
    }
    let snapshot = app.store.snapshot().await;
    let board = view::group_by_stage(&snapshot);

    for (stage, count) in view::stage_counts(&snapshot) {
        println!("== {} ({}) ==", stage, count);
        for task in board.column(stage) {
            println!("  {}", task_line(task));
        }
    }
    Ok(None)
}

pub async fn stats(app: &App) -> Result<Option<Notice>> {
    if let Some(notice) = load(app).await {
        return Ok(Some(notice));
    }
    let counts = view::summary_counts(&app.store.snapshot().await);
    println!(
        "Total: {}  Completed: {}  Pending: {}",
        counts.total, counts.completed, counts.pending
    );
    Ok(None)
}

/// Prints the confirmed task before the notice when the call succeeded.
fn report(operation: Operation, result: &taskdeck_core::Result<Task>) -> Notice {
    if let Ok(task) = result {
        println!("{}", task_detail(task));
    }
    Notice::for_result(operation, result)
}

pub async fn add(app: &App, draft: TaskDraft) -> Result<Option<Notice>> {
    authenticate(app).await;
    let result = app.store.add(draft).await;
    Ok(Some(report(Operation::Add, &result)))
}

pub async fn toggle(app: &App, id: TaskId) -> Result<Option<Notice>> {
    if let Some(notice) = load(app).await {
        return Ok(Some(notice));
    }
    let result = app.store.toggle_completion(id).await;
    if let Ok(task) = &result {
        println!("{}", task_line(task));
    }
    Ok(Some(Notice::for_toggle(&result)))
}

pub async fn edit(app: &App, id: TaskId, edit: TaskEdit) -> Result<Option<Notice>> {
    authenticate(app).await;
    let result = app.store.edit(id, edit).await;
    Ok(Some(report(Operation::Edit, &result)))
}

pub async fn remove(app: &App, id: TaskId) -> Result<Option<Notice>> {
    authenticate(app).await;
    let result = app.store.remove(id).await;
    Ok(Some(Notice::for_result(Operation::Remove, &result)))
}

pub async fn add_subtask(app: &App, id: TaskId, text: &str) -> Result<Option<Notice>> {
    authenticate(app).await;
    let result = app.store.add_subtask(id, text).await;
    Ok(Some(report(Operation::AddSubtask, &result)))
}

pub async fn add_tag(app: &App, id: TaskId, name: &str) -> Result<Option<Notice>> {
    authenticate(app).await;
    let result = app.store.add_tag(id, name).await;
    Ok(Some(report(Operation::AddTag, &result)))
}

pub async fn remove_tag(app: &App, id: TaskId, tag_id: TagId) -> Result<Option<Notice>> {
    authenticate(app).await;
    let result = app.store.remove_tag(id, tag_id).await;
    Ok(Some(report(Operation::RemoveTag, &result)))
}

pub async fn by_tag(app: &App, name: &str) -> Result<Option<Notice>> {
    authenticate(app).await;
    match app.store.tasks_by_tag(name).await {
        Ok(tasks) => {
            print_tasks(&tasks);
            Ok(None)
        }
        Err(e) => Ok(Some(Notice::error(format!("Could not list tasks tagged '{name}': {e}")))),
    }
}
