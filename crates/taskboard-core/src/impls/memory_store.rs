//! InMemoryKvStore - 開発・テスト用のストレージ
//!
//! # 学習ポイント
//! - Clone したハンドル同士で同じ中身を共有する（Arc）
//! - 書き込み失敗（quota 超過）を注入できる

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::ports::{KvStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

/// InMemoryKvStore は HashMap ベースの KvStore
///
/// # 使用例
/// ```ignore
/// let store = InMemoryKvStore::new();
/// let handle = store.clone();
/// // store を builder に渡しても handle から中身を覗ける
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryKvStore {
    inner: Arc<Inner>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a raw value (bypasses write-failure injection).
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        if let Ok(mut entries) = self.inner.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        self
    }

    /// Make every subsequent `set` fail with `QuotaExceeded` (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    /// Raw text currently stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner
            .entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("in-memory store lock poisoned".to_string())
}

impl KvStore for InMemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.inner.entries.lock().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::QuotaExceeded(key.to_string()));
        }
        let mut entries = self.inner.entries.lock().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
