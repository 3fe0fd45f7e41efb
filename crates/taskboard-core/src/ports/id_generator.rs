//! IdGenerator port - ID 生成の抽象化
//!
//! # 実装
//! - **ClockIdGenerator**: task id はミリ秒時刻ベース（単調増加）、run id は ULID

use std::sync::atomic::{AtomicU64, Ordering};

use ulid::Ulid;

use crate::domain::{RunId, TaskId};
use crate::ports::Clock;

/// IdGenerator はタスクと実行の ID を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（controller の共有状態に入るため）
pub trait IdGenerator: Send + Sync {
    /// Task ID を生成（一度払い出した値は二度と返さない）
    fn next_task_id(&self) -> TaskId;

    /// Run ID を生成
    fn next_run_id(&self) -> RunId;
}

/// ClockIdGenerator は Clock を元に ID を生成
///
/// - task id: `max(now_ms, 直前の値 + 1)`。同じミリ秒に複数作成しても衝突しない
/// - run id: `Ulid::from_parts(now_ms, random)`
pub struct ClockIdGenerator<C> {
    clock: C,
    last_task_id: AtomicU64,
}

impl<C: Clock> ClockIdGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last_task_id: AtomicU64::new(0),
        }
    }

    fn now_millis(&self) -> u64 {
        u64::try_from(self.clock.now().timestamp_millis()).unwrap_or(0)
    }
}

impl<C: Clock> IdGenerator for ClockIdGenerator<C> {
    fn next_task_id(&self) -> TaskId {
        let now = self.now_millis();
        let previous = self
            .last_task_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        TaskId::new(now.max(previous + 1))
    }

    fn next_run_id(&self) -> RunId {
        let ulid = Ulid::from_parts(self.now_millis(), rand::random());
        RunId::from(ulid)
    }
}
