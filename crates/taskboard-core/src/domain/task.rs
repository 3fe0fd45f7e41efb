use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Category, IconName, TaskId, TaskStatus, TaskboardError, TriggerType};

pub const TRIGGERED_BY_CREATION: &str = "Manual Creation";
pub const TRIGGERED_BY_UPDATE: &str = "Manual Update";

/// One automation definition plus its last known run result.
///
/// Serialized layout is the persisted `automation-tasks` record
/// (camelCase, icon stored as `iconName`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub status: TaskStatus,
    pub last_run_time: DateTime<Utc>,
    pub triggered_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Category,
    pub trigger_type: TriggerType,
    pub icon_name: IconName,
}

impl Task {
    /// Build a freshly created task (status Scheduled, provenance "Manual Creation").
    pub fn from_draft(id: TaskId, draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            status: TaskStatus::Scheduled,
            last_run_time: now,
            triggered_by: TRIGGERED_BY_CREATION.to_string(),
            description: draft.description.filter(|d| !d.trim().is_empty()),
            category: draft.category,
            trigger_type: draft.trigger_type,
            icon_name: IconName::normalize(draft.icon_name.as_deref()),
        }
    }

    /// Trim the name; an empty name is rejected.
    ///
    /// 永続層から読み戻したときと同じ形にそろえる（[`RawTask::into_task`] と同じ規則）。
    pub fn normalize_name(&mut self) -> Result<(), TaskboardError> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            return Err(TaskboardError::Validation("name must not be empty".to_string()));
        }
        self.name = trimmed.to_string();
        Ok(())
    }

    /// Apply user-editable fields. Status is never touched here.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(trigger_type) = patch.trigger_type {
            self.trigger_type = trigger_type;
        }
        if let Some(icon) = patch.icon_name {
            self.icon_name = IconName::normalize(Some(&icon));
        }
        self.triggered_by = TRIGGERED_BY_UPDATE.to_string();
    }
}

/// Fields supplied by the caller when creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    pub trigger_type: TriggerType,
    /// Free text; normalized into [`IconName`].
    pub icon_name: Option<String>,
}

impl TaskDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_trigger_type(mut self, trigger_type: TriggerType) -> Self {
        self.trigger_type = trigger_type;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon_name = Some(icon.into());
        self
    }
}

/// Partial update. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub name: Option<String>,
    /// `Some("")` clears the description.
    pub description: Option<String>,
    pub category: Option<Category>,
    pub trigger_type: Option<TriggerType>,
    pub icon_name: Option<String>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self == &TaskPatch::default()
    }
}

/// Lenient persisted form.
///
/// 永続層のデータは壊れている可能性があるので、id 以外はすべて任意の JSON 値として
/// 受け取り、[`RawTask::into_task`] で正規化する。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTask {
    id: TaskId,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    last_run_time: Option<Value>,
    #[serde(default)]
    triggered_by: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    category: Option<Value>,
    #[serde(default)]
    trigger_type: Option<Value>,
    #[serde(default)]
    icon_name: Option<Value>,
}

fn text(value: &Option<Value>) -> Option<&str> {
    value.as_ref().and_then(Value::as_str)
}

impl RawTask {
    /// Normalize into a [`Task`]. Returns `None` when the record has no usable name.
    pub(crate) fn into_task(self) -> Option<Task> {
        let name = text(&self.name).map(str::trim).filter(|n| !n.is_empty())?;

        let last_run_time = match text(&self.last_run_time) {
            Some(raw) => raw.parse::<DateTime<Utc>>().unwrap_or_else(|err| {
                tracing::warn!(task_id = %self.id, raw, %err, "unparseable lastRunTime");
                DateTime::<Utc>::default()
            }),
            None => DateTime::<Utc>::default(),
        };

        Some(Task {
            id: self.id,
            name: name.to_string(),
            status: TaskStatus::parse_or_default(text(&self.status)),
            last_run_time,
            triggered_by: text(&self.triggered_by).unwrap_or_default().to_string(),
            description: text(&self.description).map(str::to_string),
            category: Category::parse_or_default(text(&self.category)),
            trigger_type: TriggerType::parse_or_default(text(&self.trigger_type)),
            icon_name: IconName::normalize(text(&self.icon_name)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn from_draft_sets_creation_defaults() {
        let draft = TaskDraft::new("  Nightly ETL ")
            .with_category(Category::Data)
            .with_trigger_type(TriggerType::Daily)
            .with_icon("database");

        let task = Task::from_draft(TaskId::new(42), draft, now());

        assert_eq!(task.name, "Nightly ETL");
        assert_eq!(task.status, TaskStatus::Scheduled);
        assert_eq!(task.triggered_by, TRIGGERED_BY_CREATION);
        assert_eq!(task.icon_name, IconName::Database);
        assert_eq!(task.last_run_time, now());
        assert_eq!(task.description, None);
    }

    #[rstest]
    #[case("Nightly ETL", Some("Load warehouse"), "Nightly ETL", Some("Load warehouse"))]
    #[case("  Nightly ETL ", None, "Nightly ETL", None)]
    #[case("\tReport\n", Some("   "), "Report", None)]
    #[case("Report", Some(""), "Report", None)]
    #[case("Report", Some(" keep spacing "), "Report", Some(" keep spacing "))]
    fn from_draft_stores_trimmed_name_and_drops_blank_description(
        #[case] name: &str,
        #[case] description: Option<&str>,
        #[case] expected_name: &str,
        #[case] expected_description: Option<&str>,
    ) {
        let mut draft = TaskDraft::new(name);
        if let Some(description) = description {
            draft = draft.with_description(description);
        }

        let task = Task::from_draft(TaskId::new(1), draft, now());

        assert_eq!(task.name, expected_name);
        assert_eq!(task.description.as_deref(), expected_description);
    }

    #[test]
    fn normalize_name_rejects_blank() {
        let mut task = Task::from_draft(TaskId::new(1), TaskDraft::new("a"), now());
        task.name = " \t ".to_string();
        assert!(matches!(
            task.normalize_name(),
            Err(TaskboardError::Validation(_))
        ));
    }

    #[test]
    fn apply_patch_keeps_status_and_marks_update() {
        let mut task = Task::from_draft(TaskId::new(1), TaskDraft::new("a"), now());
        task.status = TaskStatus::Failed;

        task.apply(TaskPatch {
            name: Some("b".into()),
            icon_name: Some("SERVER".into()),
            ..TaskPatch::default()
        });

        assert_eq!(task.name, "b");
        assert_eq!(task.icon_name, IconName::Server);
        assert_eq!(task.status, TaskStatus::Failed);
        assert_eq!(task.triggered_by, TRIGGERED_BY_UPDATE);
    }

    #[test]
    fn serialized_layout_matches_the_store_format() {
        let task = Task::from_draft(TaskId::new(7), TaskDraft::new("x"), now());
        let value = serde_json::to_value(&task).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["lastRunTime"], "2025-06-15T10:00:00Z");
        assert_eq!(value["triggeredBy"], "Manual Creation");
        assert_eq!(value["triggerType"], "Manual");
        assert_eq!(value["iconName"], "Activity");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn raw_task_normalizes_loose_fields() {
        let raw: RawTask = serde_json::from_value(json!({
            "id": 4,
            "name": "Email Campaign Automation",
            "status": 17,
            "category": "Marketing",
            "iconName": "mail",
            "lastRunTime": "not a date"
        }))
        .unwrap();

        let task = raw.into_task().unwrap();
        assert_eq!(task.status, TaskStatus::Scheduled);
        assert_eq!(task.category, Category::Marketing);
        assert_eq!(task.trigger_type, TriggerType::Manual);
        assert_eq!(task.icon_name, IconName::Mail);
        assert_eq!(task.last_run_time, DateTime::<Utc>::default());
    }

    #[test]
    fn raw_task_without_name_is_rejected() {
        let raw: RawTask = serde_json::from_value(json!({ "id": 9, "name": "  " })).unwrap();
        assert!(raw.into_task().is_none());
    }
}
