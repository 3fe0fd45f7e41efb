//! KvStore port - 永続化媒体（ブラウザの localStorage 相当）
//!
//! 値は JSON テキスト。キーは `automation-tasks` / `theme-preference` のような
//! 短い識別子。JSON の解釈は [`crate::store::DurableStore`] が担当する。

use thiserror::Error;

/// Errors reported by a storage medium.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage quota exceeded for key `{0}`")]
    QuotaExceeded(String),

    #[error("invalid store key `{0}`")]
    InvalidKey(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// KvStore provides a synchronous key-value interface over JSON text.
///
/// # 設計原則
/// - 書き込みは呼び出し元から見て同期的（遅延バッチなし）
/// - 値は常に丸ごと置き換え（部分パッチなし）
pub trait KvStore: Send + Sync {
    /// Get the value for a key. Returns `None` if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value for a key.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KvStore + ?Sized> KvStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
