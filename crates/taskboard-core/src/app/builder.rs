//! TaskboardBuilder - アプリケーションの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装（型パラメータを差し替える `clock()`）
//! - 起動時検証（Fail-fast 設計）

use std::collections::HashSet;
use std::sync::Arc;

use crate::app::controller::TaskController;
use crate::app::theme::ThemePreference;
use crate::domain::{Task, TaskId, default_tasks};
use crate::ports::{Clock, ClockIdGenerator, IdGenerator, KvStore, SystemClock};
use crate::repository::TaskRepository;
use crate::store::DurableStore;

/// TaskboardBuilder は store / clock / id 生成器 / seed set を組み立てる
///
/// # 使用例
/// ```ignore
/// let board = TaskboardBuilder::new(InMemoryKvStore::new())
///     .clock(FixedClock::new(at))
///     .build()?;
/// board.tasks.start_task(TaskId::new(3)).await?;
/// ```
///
/// # Fail-fast 設計
/// - build() 時に seed set の id 重複をチェック
pub struct TaskboardBuilder<S, C> {
    store: S,
    clock: C,
    seed: Vec<Task>,
    ids: Option<Arc<dyn IdGenerator>>,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Duplicate seed task id: {0}. Seed ids must be unique.")]
    DuplicateSeedId(TaskId),
}

impl<S: KvStore + Clone + 'static> TaskboardBuilder<S, SystemClock> {
    /// Shipped seed set, system clock, clock-based id generator.
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: SystemClock,
            seed: default_tasks(),
            ids: None,
        }
    }
}

impl<S, C> TaskboardBuilder<S, C>
where
    S: KvStore + Clone + 'static,
    C: Clock + Clone + 'static,
{
    pub fn clock<C2: Clock + Clone + 'static>(self, clock: C2) -> TaskboardBuilder<S, C2> {
        TaskboardBuilder {
            store: self.store,
            clock,
            seed: self.seed,
            ids: self.ids,
        }
    }

    /// Replace the seed set.
    pub fn seed(mut self, tasks: Vec<Task>) -> Self {
        self.seed = tasks;
        self
    }

    pub fn id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Some(Arc::new(ids));
        self
    }

    /// Validate and wire everything together.
    pub fn build(self) -> Result<Taskboard<S, C>, BuildError> {
        let mut seen = HashSet::new();
        for task in &self.seed {
            if !seen.insert(task.id) {
                return Err(BuildError::DuplicateSeedId(task.id));
            }
        }

        let ids = self
            .ids
            .unwrap_or_else(|| Arc::new(ClockIdGenerator::new(self.clock.clone())));
        let repo = TaskRepository::new(DurableStore::new(self.store.clone()), self.clock, self.seed);

        Ok(Taskboard {
            tasks: TaskController::new(repo, ids),
            theme: ThemePreference::new(DurableStore::new(self.store)),
        })
    }
}

/// Taskboard は view 層に渡すコンテキスト
///
/// グローバル状態は持たない。必要なハンドルはすべてここから渡す。
pub struct Taskboard<S, C> {
    pub tasks: TaskController<S, C>,
    pub theme: ThemePreference<S>,
}
