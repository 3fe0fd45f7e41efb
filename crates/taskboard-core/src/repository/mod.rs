//! Task Repository - タスク一覧の正本
//!
//! seed set と永続 overlay を id でマージした結果が「正」の一覧。
//! `automation-tasks` キーに書き込むのはこのモジュールだけ。
//!
//! # 設計原則
//! - 各操作の前に overlay をストアから読み直す（外部で書き換えられても追従する）
//! - ただし直前の書き込みが失敗していたら、メモリ上の overlay が正。
//!   次の操作でまず書き直しを試みる
//! - 書き込みは操作と同期的（遅延バッチなし）
//! - 媒体の読み込みエラーは「キーが無い」とは区別する。seed で上書きせず、
//!   メモリ上の overlay を使い続ける

mod merge;

pub use merge::merge_by_id;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::{RawTask, StoreWriteError, Task, TaskId, TaskStatus, TaskboardError};
use crate::ports::{Clock, KvStore, StoreError};
use crate::store::{DurableStore, TASKS_KEY};

/// Merged task list materialized once per [`TaskRepository::load_all`] call.
///
/// 一度きりのイテレータ。もう一度欲しければ `load_all` を呼び直す。
#[derive(Debug)]
pub struct TaskSnapshot {
    inner: std::vec::IntoIter<Task>,
}

impl Iterator for TaskSnapshot {
    type Item = Task;

    fn next(&mut self) -> Option<Task> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for TaskSnapshot {}

impl std::iter::FusedIterator for TaskSnapshot {}

pub struct TaskRepository<S, C> {
    store: DurableStore<S>,
    clock: C,
    seed: Vec<Task>,
    /// In-memory copy of the persisted overlay.
    overlay: Vec<Task>,
    /// The last overlay write failed; memory is ahead of the store.
    pending_flush: bool,
    /// The overlay has been read (or initialized) at least once.
    loaded: bool,
}

impl<S: KvStore, C: Clock> TaskRepository<S, C> {
    pub fn new(store: DurableStore<S>, clock: C, seed: Vec<Task>) -> Self {
        Self {
            store,
            clock,
            seed,
            overlay: Vec::new(),
            pending_flush: false,
            loaded: false,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Merged view of seed set and overlay (overlay wins by id).
    pub fn load_all(&mut self) -> TaskSnapshot {
        self.sync_overlay();
        let merged = merge_by_id(&self.seed, &self.overlay);
        debug!(count = merged.len(), "tasks loaded");
        TaskSnapshot {
            inner: merged.into_iter(),
        }
    }

    /// Look up one task in the merged view. Unknown ids are a normal `None`.
    pub fn find_by_id(&mut self, id: TaskId) -> Option<Task> {
        self.sync_overlay();
        self.lookup(id)
    }

    /// Insert or replace a whole task record.
    ///
    /// 名前は trim して保存する（空なら `Validation`）。戻り値は読み戻したときと同じ。
    /// `lastRunTime` は常に現在時刻で上書きする。書き込みに失敗してもメモリ上は
    /// 更新済み（`Err` で報告するだけ）。
    pub fn upsert(&mut self, mut task: Task) -> Result<Task, TaskboardError> {
        task.normalize_name()?;
        self.sync_overlay();
        self.ensure_loaded()?;
        task.last_run_time = self.clock.now();

        match self.overlay.iter().rposition(|t| t.id == task.id) {
            Some(pos) => self.overlay[pos] = task.clone(),
            None => self.overlay.push(task.clone()),
        }

        self.persist()?;
        Ok(task)
    }

    /// Apply `edit` to an existing task (seed rows are promoted into the overlay
    /// first) and persist it.
    pub fn modify<F>(&mut self, id: TaskId, edit: F) -> Result<Task, TaskboardError>
    where
        F: FnOnce(&mut Task),
    {
        self.sync_overlay();

        let pos = self.overlay.iter().rposition(|t| t.id == id);
        let mut task = match pos {
            Some(pos) => self.overlay[pos].clone(),
            None => self
                .seed
                .iter()
                .find(|t| t.id == id)
                .cloned()
                .ok_or(TaskboardError::NotFound(id))?,
        };
        self.ensure_loaded()?;

        edit(&mut task);
        task.normalize_name()?;
        task.last_run_time = self.clock.now();

        match pos {
            Some(pos) => self.overlay[pos] = task.clone(),
            None => {
                debug!(task_id = %id, "promoting seed task into overlay");
                self.overlay.push(task.clone());
            }
        }

        self.persist()?;
        Ok(task)
    }

    /// Status transition that is all-or-nothing: if the write fails the
    /// in-memory overlay is rolled back, so readers only ever see the last
    /// durably written status.
    pub fn set_status(&mut self, id: TaskId, status: TaskStatus) -> Result<Task, TaskboardError> {
        self.sync_overlay();
        let before = self.overlay.clone();
        let was_pending = self.pending_flush;

        match self.modify(id, |task| task.status = status) {
            Err(TaskboardError::StoreWrite(err)) => {
                self.overlay = before;
                self.pending_flush = was_pending;
                Err(TaskboardError::StoreWrite(err))
            }
            other => other,
        }
    }

    fn lookup(&self, id: TaskId) -> Option<Task> {
        self.overlay
            .iter()
            .rfind(|t| t.id == id)
            .or_else(|| self.seed.iter().find(|t| t.id == id))
            .cloned()
    }

    /// Refuse to write before the overlay was ever read: writing then would
    /// replace the stored records with a partial list.
    fn ensure_loaded(&self) -> Result<(), StoreWriteError> {
        if self.loaded {
            return Ok(());
        }
        Err(StoreWriteError {
            key: TASKS_KEY.to_string(),
            source: StoreError::Unavailable("task overlay has not been read yet".to_string()),
        })
    }

    fn persist(&mut self) -> Result<(), StoreWriteError> {
        match self.store.write(TASKS_KEY, &self.overlay) {
            Ok(()) => {
                self.pending_flush = false;
                Ok(())
            }
            Err(err) => {
                self.pending_flush = true;
                Err(err)
            }
        }
    }

    /// Refresh the in-memory overlay from the store (or retry a pending flush).
    fn sync_overlay(&mut self) {
        if self.pending_flush {
            match self.persist() {
                Ok(()) => info!("pending task overlay flushed"),
                Err(err) => debug!(%err, "task overlay still not writable"),
            }
            return;
        }

        match self.store.try_read::<Vec<Value>>(TASKS_KEY) {
            Ok(Some(records)) => {
                self.overlay = decode_overlay(records);
                self.loaded = true;
            }
            Err(err) => {
                warn!(%err, loaded = self.loaded, "task overlay unreadable, keeping in-memory copy");
            }
            Ok(None) => {
                self.loaded = true;
                info!(
                    seed = self.seed.len(),
                    "persisted task overlay absent or malformed, initializing with seed set"
                );
                self.overlay = self.seed.clone();
                if let Err(err) = self.persist() {
                    warn!(%err, "could not initialize task overlay");
                }
            }
        }
    }
}

fn decode_overlay(records: Vec<Value>) -> Vec<Task> {
    records
        .into_iter()
        .filter_map(|record| {
            let task = serde_json::from_value::<RawTask>(record)
                .ok()
                .and_then(RawTask::into_task);
            if task.is_none() {
                warn!("dropping malformed task record from overlay");
            }
            task
        })
        .collect()
}
