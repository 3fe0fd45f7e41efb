//! Durable Store Adapter
//!
//! KvStore の上に JSON の読み書きを載せる。読み込みは決して失敗しない：
//! キーが無い・媒体エラー・JSON が壊れている、いずれも呼び出し元の既定値を返す。
//! 書き込み失敗は報告するが致命的ではない。

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::StoreWriteError;
use crate::ports::{KvStore, StoreError};

/// Key holding the persisted task overlay (JSON array).
pub const TASKS_KEY: &str = "automation-tasks";

/// Key holding the dark-mode flag (JSON boolean).
pub const THEME_KEY: &str = "theme-preference";

#[derive(Debug, Clone)]
pub struct DurableStore<S> {
    medium: S,
}

impl<S: KvStore> DurableStore<S> {
    pub fn new(medium: S) -> Self {
        Self { medium }
    }

    /// Read `key`, or `default` when it is absent or unreadable.
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.read_opt(key).unwrap_or(default)
    }

    /// Read `key`; `None` means absent, unreadable or malformed.
    pub fn read_opt<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.try_read(key).unwrap_or_else(|err| {
            warn!(key, %err, "store read failed, using default");
            None
        })
    }

    /// Like [`read_opt`](Self::read_opt), but a failing medium is an `Err`
    /// instead of looking like a missing key. Malformed JSON is still `Ok(None)`.
    pub fn try_read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(text) = self.medium.get(key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(key, %err, "stored value is malformed, using default");
                Ok(None)
            }
        }
    }

    /// Serialize `value` and replace `key` with it.
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreWriteError> {
        let text = serde_json::to_string(value).map_err(|e| StoreWriteError {
            key: key.to_string(),
            source: StoreError::Serialization(e.to_string()),
        })?;

        self.medium.set(key, &text).map_err(|source| {
            let err = StoreWriteError {
                key: key.to_string(),
                source,
            };
            warn!(%err, "store write rejected");
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::InMemoryKvStore;

    #[test]
    fn read_missing_key_returns_default() {
        let store = DurableStore::new(InMemoryKvStore::new());
        assert!(!store.read(THEME_KEY, false));
        assert_eq!(store.read_opt::<bool>(THEME_KEY), None);
    }

    #[test]
    fn read_malformed_json_returns_default() {
        let medium = InMemoryKvStore::new().with_entry(TASKS_KEY, "{not json");
        let store = DurableStore::new(medium);
        let tasks: Vec<serde_json::Value> = store.read(TASKS_KEY, Vec::new());
        assert!(tasks.is_empty());
    }

    #[test]
    fn read_wrong_shape_returns_default() {
        let medium = InMemoryKvStore::new().with_entry(THEME_KEY, "\"dark\"");
        let store = DurableStore::new(medium);
        assert!(store.read(THEME_KEY, true));
    }

    #[test]
    fn write_then_read() {
        let medium = InMemoryKvStore::new();
        let store = DurableStore::new(medium.clone());
        store.write(THEME_KEY, &true).unwrap();

        assert_eq!(medium.raw(THEME_KEY).as_deref(), Some("true"));
        assert!(store.read(THEME_KEY, false));
    }

    #[test]
    fn write_failure_is_reported_with_key() {
        let medium = InMemoryKvStore::new();
        medium.fail_writes(true);
        let store = DurableStore::new(medium);

        let err = store.write(TASKS_KEY, &Vec::<u8>::new()).unwrap_err();
        assert_eq!(err.key, TASKS_KEY);
        assert!(matches!(err.source, StoreError::QuotaExceeded(_)));
    }
}
