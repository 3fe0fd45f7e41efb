//! Domain model (ids, status, icon, category, task, seed set, errors).

pub mod category;
pub mod errors;
pub mod icon;
pub mod ids;
pub mod seed;
pub mod status;
pub mod task;

pub use self::category::{Category, TriggerType, UnknownVariant};
pub use self::errors::{StoreWriteError, TaskboardError};
pub use self::icon::IconName;
pub use self::ids::{RunId, TaskId};
pub use self::seed::default_tasks;
pub use self::status::{TaskStatus, UnknownStatus};
pub use self::task::{Task, TaskDraft, TaskPatch, TRIGGERED_BY_CREATION, TRIGGERED_BY_UPDATE};
pub(crate) use self::task::RawTask;
