//! Task status state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Last known execution status of a task.
///
/// State transitions (driven only by the lifecycle controller):
/// - Scheduled / Completed / Failed -> Running -> Completed
///
/// Failed is never produced by the simulated run; it only arrives through
/// seed data or a persisted overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Idle, waiting for a run.
    #[default]
    Scheduled,

    /// A simulated run is pending completion.
    Running,

    /// The last run finished.
    Completed,

    /// The last run failed.
    Failed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Scheduled,
        TaskStatus::Running,
        TaskStatus::Completed,
        TaskStatus::Failed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Scheduled => "Scheduled",
            TaskStatus::Running => "Running",
            TaskStatus::Completed => "Completed",
            TaskStatus::Failed => "Failed",
        }
    }

    /// Parse persisted text, falling back to `Scheduled` for absent or
    /// unrecognized values.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for TaskStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("Completed"), TaskStatus::Completed)]
    #[case(Some("running"), TaskStatus::Running)]
    #[case(Some(" Failed "), TaskStatus::Failed)]
    #[case(Some("Paused"), TaskStatus::Scheduled)]
    #[case(Some(""), TaskStatus::Scheduled)]
    #[case(None, TaskStatus::Scheduled)]
    fn parse_or_default_falls_back_to_scheduled(
        #[case] raw: Option<&str>,
        #[case] expected: TaskStatus,
    ) {
        assert_eq!(TaskStatus::parse_or_default(raw), expected);
    }

    #[test]
    fn serializes_as_variant_name() {
        let json = serde_json::to_string(&TaskStatus::Completed).unwrap();
        assert_eq!(json, "\"Completed\"");
    }
}
