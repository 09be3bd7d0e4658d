//! View projections over a task snapshot.
//!
//! Pure functions: no side effects and no caching, every call re-derives
//! from the slice it is given. Results borrow from the snapshot.

use crate::task::{Category, Stage, Task};
use std::cmp::Reverse;
use std::str::FromStr;
use strum::IntoEnumIterator;

/// Which tasks a list view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterCriterion {
    #[default]
    All,
    Active,
    Completed,
    Category(Category),
}

impl FilterCriterion {
    /// Parses a filter token. Unknown tokens fall back to `All`.
    pub fn parse(token: &str) -> Self {
        match token {
            "all" => FilterCriterion::All,
            "active" => FilterCriterion::Active,
            "completed" => FilterCriterion::Completed,
            other => Category::from_str(other)
                .map(FilterCriterion::Category)
                .unwrap_or_default(),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            FilterCriterion::All => true,
            FilterCriterion::Active => !task.completed,
            FilterCriterion::Completed => task.completed,
            FilterCriterion::Category(category) => task.category == *category,
        }
    }
}

impl From<&str> for FilterCriterion {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}

/// Tasks matching `criterion`, in snapshot order.
pub fn filter_by<'a>(tasks: &'a [Task], criterion: FilterCriterion) -> Vec<&'a Task> {
    tasks.iter().filter(|task| criterion.matches(task)).collect()
}

/// Tasks carrying a tag named exactly `name`, in snapshot order.
pub fn filter_by_tag<'a>(tasks: &'a [Task], name: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|task| task.has_tag(name)).collect()
}

/// Tasks ordered high priority first. Equal priorities keep snapshot order.
pub fn sort_by_priority(tasks: &[Task]) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by_key(|task| Reverse(task.priority));
    sorted
}

/// A board of tasks partitioned by stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageBoard<'a> {
    pub todo: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

impl<'a> StageBoard<'a> {
    /// The column for `stage`.
    pub fn column(&self, stage: Stage) -> &[&'a Task] {
        match stage {
            Stage::Todo => &self.todo,
            Stage::InProgress => &self.in_progress,
            Stage::Done => &self.done,
        }
    }

    /// Columns in board order: todo, in progress, done.
    pub fn columns(&self) -> impl Iterator<Item = (Stage, &[&'a Task])> + '_ {
        Stage::iter().map(move |stage| (stage, self.column(stage)))
    }

    fn column_mut(&mut self, stage: Stage) -> &mut Vec<&'a Task> {
        match stage {
            Stage::Todo => &mut self.todo,
            Stage::InProgress => &mut self.in_progress,
            Stage::Done => &mut self.done,
        }
    }
}

/// Partitions tasks by stage, preserving relative order within each column.
pub fn group_by_stage(tasks: &[Task]) -> StageBoard<'_> {
    let mut board = StageBoard::default();
    for task in tasks {
        board.column_mut(task.stage).push(task);
    }
    board
}

/// Number of tasks in each stage, in board order.
pub fn stage_counts(tasks: &[Task]) -> Vec<(Stage, usize)> {
    Stage::iter()
        .map(|stage| (stage, tasks.iter().filter(|t| t.stage == stage).count()))
        .collect()
}

/// Aggregate counts for a snapshot. `total == completed + pending` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryCounts {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

pub fn summary_counts(tasks: &[Task]) -> SummaryCounts {
    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.completed).count();
    SummaryCounts {
        total,
        completed,
        pending: total - completed,
    }
}
