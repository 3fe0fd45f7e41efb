//! Seed set - 出荷時のデフォルトタスク
//!
//! 永続データが無くても必ず一覧に現れる。永続 overlay に同じ id があれば
//! そちらが優先される。

use chrono::{DateTime, TimeZone, Utc};

use super::{Category, IconName, Task, TaskId, TaskStatus, TriggerType};

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

struct SeedRow {
    id: u64,
    name: &'static str,
    status: TaskStatus,
    last_run_time: DateTime<Utc>,
    triggered_by: &'static str,
    description: &'static str,
    category: Category,
    trigger_type: TriggerType,
    icon_name: IconName,
}

impl From<SeedRow> for Task {
    fn from(row: SeedRow) -> Self {
        Task {
            id: TaskId::new(row.id),
            name: row.name.to_string(),
            status: row.status,
            last_run_time: row.last_run_time,
            triggered_by: row.triggered_by.to_string(),
            description: Some(row.description.to_string()),
            category: row.category,
            trigger_type: row.trigger_type,
            icon_name: row.icon_name,
        }
    }
}

/// The shipped default tasks, in display order.
pub fn default_tasks() -> Vec<Task> {
    [
        SeedRow {
            id: 1,
            name: "Daily Database Backup",
            status: TaskStatus::Completed,
            last_run_time: at(15, 2, 0),
            triggered_by: "System Scheduler",
            description: "Automated daily backup of production database",
            category: Category::Database,
            trigger_type: TriggerType::Daily,
            icon_name: IconName::Database,
        },
        SeedRow {
            id: 2,
            name: "User Activity Report",
            status: TaskStatus::Running,
            last_run_time: at(15, 8, 30),
            triggered_by: "Analytics Engine",
            description: "Generate user activity reports",
            category: Category::Analytics,
            trigger_type: TriggerType::Weekly,
            icon_name: IconName::Activity,
        },
        SeedRow {
            id: 3,
            name: "Server Health Monitoring",
            status: TaskStatus::Scheduled,
            last_run_time: at(15, 7, 45),
            triggered_by: "Monitoring Agent",
            description: "Monitor server resources",
            category: Category::Infrastructure,
            trigger_type: TriggerType::Manual,
            icon_name: IconName::Server,
        },
        SeedRow {
            id: 4,
            name: "Email Campaign Automation",
            status: TaskStatus::Failed,
            last_run_time: at(15, 6, 15),
            triggered_by: "Marketing Team",
            description: "Automated email campaigns for customer engagement and retention",
            category: Category::Marketing,
            trigger_type: TriggerType::Manual,
            icon_name: IconName::Mail,
        },
        SeedRow {
            id: 5,
            name: "Security Audit Scanner",
            status: TaskStatus::Completed,
            last_run_time: at(15, 3, 20),
            triggered_by: "Security Team",
            description: "Automated security vulnerability scanning and compliance checks",
            category: Category::Security,
            trigger_type: TriggerType::Manual,
            icon_name: IconName::Shield,
        },
        SeedRow {
            id: 6,
            name: "User Onboarding Workflow",
            status: TaskStatus::Scheduled,
            last_run_time: at(14, 16, 30),
            triggered_by: "HR Portal",
            description: "Streamlined new user account creation and permission assignment",
            category: Category::Hr,
            trigger_type: TriggerType::Manual,
            icon_name: IconName::User,
        },
        SeedRow {
            id: 7,
            name: "Data Synchronization Process",
            status: TaskStatus::Running,
            last_run_time: at(15, 9, 0),
            triggered_by: "Data Pipeline",
            description: "Real-time synchronization between multiple data sources and warehouses",
            category: Category::Data,
            trigger_type: TriggerType::Manual,
            icon_name: IconName::Database,
        },
    ]
    .into_iter()
    .map(Task::from)
    .collect()
}
