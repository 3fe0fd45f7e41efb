//! Plain-text log report for a single task.

use std::fmt::{self, Write as _};

use crate::domain::Task;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Printable summary of one task plus its synthesized log listing.
#[derive(Debug, Clone, Copy)]
pub struct TaskReport<'a> {
    task: &'a Task,
}

impl<'a> TaskReport<'a> {
    pub fn new(task: &'a Task) -> Self {
        Self { task }
    }

    /// Fixed log lines shown for every task.
    pub fn log_entries(&self) -> Vec<String> {
        vec![
            "Task initiated successfully".to_string(),
            "Processing data...".to_string(),
            format!("Status: {}", self.task.status),
            format!("Last run: {}", self.last_run()),
        ]
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    /// `logs_<name>.txt`, whitespace runs replaced by `_`.
    pub fn file_name(&self) -> String {
        let stem = self.task.name.split_whitespace().collect::<Vec<_>>().join("_");
        format!("logs_{stem}.txt")
    }

    fn last_run(&self) -> String {
        self.task.last_run_time.format(TIME_FORMAT).to_string()
    }
}

impl fmt::Display for TaskReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let task = self.task;
        let mut out = String::new();
        writeln!(out, "Task Logs: {}", task.name)?;
        writeln!(out)?;
        writeln!(out, "Task Details")?;
        writeln!(out, "Name: {}", task.name)?;
        writeln!(out, "Category: {}", task.category)?;
        writeln!(out, "Status: {}", task.status)?;
        writeln!(out, "Last Run: {}", self.last_run())?;
        writeln!(out, "Triggered By: {}", task.triggered_by)?;
        writeln!(
            out,
            "Description: {}",
            task.description.as_deref().unwrap_or("N/A")
        )?;
        writeln!(out, "Trigger Type: {}", task.trigger_type)?;
        writeln!(out, "Icon: {}", task.icon_name)?;
        writeln!(out)?;
        writeln!(out, "Log Entries")?;
        for entry in self.log_entries() {
            writeln!(out, "- {entry}")?;
        }
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskId, default_tasks};

    fn seed(id: u64) -> Task {
        default_tasks()
            .into_iter()
            .find(|t| t.id == TaskId::new(id))
            .unwrap()
    }

    #[test]
    fn file_name_replaces_whitespace() {
        let task = seed(1);
        assert_eq!(TaskReport::new(&task).file_name(), "logs_Daily_Database_Backup.txt");
    }

    #[test]
    fn render_lists_fields_and_log_entries() {
        let task = seed(4);
        let text = TaskReport::new(&task).render();

        assert!(text.starts_with(&format!("Task Logs: {}\n", task.name)));
        assert!(text.contains("Status: Failed\n"));
        assert!(text.contains(&format!("Triggered By: {}\n", task.triggered_by)));
        assert!(text.contains("- Task initiated successfully\n"));
        assert!(text.contains("- Processing data...\n"));
        assert!(text.contains("- Status: Failed\n"));
        assert!(text.ends_with(&format!(
            "- Last run: {}\n",
            task.last_run_time.format(TIME_FORMAT)
        )));
    }

    #[test]
    fn missing_description_is_na() {
        let mut task = seed(1);
        task.description = None;
        let text = TaskReport::new(&task).render();
        assert!(text.contains("Description: N/A\n"));
    }

    #[test]
    fn log_entries_are_fixed_four() {
        let task = seed(2);
        let entries = TaskReport::new(&task).log_entries();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[2], "Status: Running");
    }
}
