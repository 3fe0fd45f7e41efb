//! Errors - エラー型と分類
//!
//! どのエラーもプロセスを落とさない。最悪でも一覧が古い／seed にリセットされる程度。

use thiserror::Error;

use super::TaskId;
use crate::ports::StoreError;

/// A write to the durable store was rejected.
///
/// メモリ上の状態はそのまま（次の書き込み成功まではメモリが正）。
#[derive(Debug, Error)]
#[error("failed to write store key `{key}`: {source}")]
pub struct StoreWriteError {
    pub key: String,
    #[source]
    pub source: StoreError,
}

/// Errors surfaced to the view layer.
#[derive(Debug, Error)]
pub enum TaskboardError {
    /// Required field missing; rejected before reaching the repository.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Operation referenced an unknown id.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The store rejected a write.
    #[error(transparent)]
    StoreWrite(#[from] StoreWriteError),
}

impl TaskboardError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TaskboardError::NotFound(_))
    }
}
