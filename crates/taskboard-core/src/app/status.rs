//! Status - ステータス集計
//!
//! ダッシュボードのサマリーカード用。出現しないステータスはキー自体を持たない。

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{Task, TaskStatus};

/// Count of tasks per status. Zero-count statuses are absent; iteration
/// order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusCounts {
    counts: HashMap<TaskStatus, usize>,
}

impl StatusCounts {
    /// Count for `status` (0 when absent).
    pub fn get(&self, status: TaskStatus) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn contains(&self, status: TaskStatus) -> bool {
        self.counts.contains_key(&status)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TaskStatus, usize)> + '_ {
        self.counts.iter().map(|(status, count)| (*status, *count))
    }

    pub fn as_map(&self) -> &HashMap<TaskStatus, usize> {
        &self.counts
    }
}

/// Tally tasks by status.
pub fn count_by_status<'a, I>(tasks: I) -> StatusCounts
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut counts = HashMap::new();
    for task in tasks {
        *counts.entry(task.status).or_insert(0) += 1;
    }
    StatusCounts { counts }
}
