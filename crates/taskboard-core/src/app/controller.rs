//! Task Lifecycle Controller
//!
//! タスクの status を変更できる唯一のコンポーネント。シミュレーション実行の
//! オーケストレーションもここだけが行う。
//!
//! # 状態遷移（id ごと）
//! ```text
//! Idle (Scheduled/Completed/Failed) --start--> Running --3s--> Idle (Completed)
//! ```
//!
//! # 並行性
//! - in-flight マップが id ごとの再入防止の唯一の共有状態
//! - check-and-set は 1 つの Mutex ガードの中で行う
//! - 実行は tokio タスク（TaskTracker で追跡）。待っている間も他の操作は通る
//! - 各実行は CancellationToken を持つ（今は shutdown 時のみ発火）

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

use crate::app::status::{StatusCounts, count_by_status};
use crate::domain::{RunId, Task, TaskDraft, TaskId, TaskPatch, TaskStatus, TaskboardError};
use crate::ports::{Clock, IdGenerator, KvStore};
use crate::repository::TaskRepository;

/// How long a simulated run stays in `Running` before it completes.
pub const SIMULATED_RUN_DURATION: Duration = Duration::from_secs(3);

/// Result of [`TaskController::start_task`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new run was scheduled.
    Started(RunId),
    /// The task already had a run pending; nothing was scheduled.
    AlreadyRunning,
}

/// In-flight marker for one task.
///
/// 個別キャンセル API はまだ無い。トークンは今のところ shutdown でのみ発火する。
#[derive(Debug)]
struct InFlight {
    run_id: RunId,
    cancel: CancellationToken,
}

struct Shared<S, C> {
    repo: Mutex<TaskRepository<S, C>>,
    in_flight: Mutex<HashMap<TaskId, InFlight>>,
    ids: Arc<dyn IdGenerator>,
    tracker: TaskTracker,
}

/// Handle given to the view layer. Cloning shares the same state.
pub struct TaskController<S, C> {
    shared: Arc<Shared<S, C>>,
}

impl<S, C> Clone for TaskController<S, C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S, C> TaskController<S, C>
where
    S: KvStore + 'static,
    C: Clock + 'static,
{
    pub(crate) fn new(repo: TaskRepository<S, C>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            shared: Arc::new(Shared {
                repo: Mutex::new(repo),
                in_flight: Mutex::new(HashMap::new()),
                ids,
                tracker: TaskTracker::new(),
            }),
        }
    }

    /// All tasks in merge order.
    pub async fn list_tasks(&self) -> Vec<Task> {
        self.shared.repo.lock().await.load_all().collect()
    }

    pub async fn find_task(&self, id: TaskId) -> Option<Task> {
        self.shared.repo.lock().await.find_by_id(id)
    }

    /// Create a task. Status starts as `Scheduled`.
    pub async fn create_task(&self, draft: TaskDraft) -> Result<Task, TaskboardError> {
        require_name(&draft.name)?;

        let mut repo = self.shared.repo.lock().await;

        // id は再利用しない。既存（seed 含む）と衝突したら取り直す
        let mut id = self.shared.ids.next_task_id();
        while repo.find_by_id(id).is_some() {
            id = self.shared.ids.next_task_id();
        }

        let task = Task::from_draft(id, draft, repo.clock().now());
        match repo.upsert(task) {
            Ok(task) => {
                info!(task_id = %task.id, name = %task.name, "task created");
                Ok(task)
            }
            Err(err) => {
                error!(task_id = %id, %err, "task create not persisted");
                Err(err)
            }
        }
    }

    /// Update user-editable fields of an existing task.
    pub async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<Task, TaskboardError> {
        if let Some(name) = &patch.name {
            require_name(name)?;
        }

        let result = self
            .shared
            .repo
            .lock()
            .await
            .modify(id, |task| task.apply(patch));

        match &result {
            Ok(task) => info!(task_id = %task.id, "task updated"),
            Err(TaskboardError::NotFound(_)) => warn!(task_id = %id, "update for unknown task"),
            Err(err) => error!(task_id = %id, %err, "task update not persisted"),
        }
        result
    }

    /// Start a simulated run. Idempotent while a run for `id` is pending.
    ///
    /// Running の書き込みが終わった時点で戻る。完了は後続の `list_tasks` で観測する。
    pub async fn start_task(&self, id: TaskId) -> Result<StartOutcome, TaskboardError> {
        let run_id = self.shared.ids.next_run_id();

        // check-and-set。ガードを離すまで同じ id の start は割り込めない
        let cancel = {
            let mut in_flight = self.shared.in_flight.lock().await;
            if let Some(current) = in_flight.get(&id) {
                debug!(task_id = %id, run_id = %current.run_id, "run already pending");
                return Ok(StartOutcome::AlreadyRunning);
            }
            let cancel = CancellationToken::new();
            in_flight.insert(
                id,
                InFlight {
                    run_id,
                    cancel: cancel.clone(),
                },
            );
            cancel
        };

        let started = self
            .shared
            .repo
            .lock()
            .await
            .set_status(id, TaskStatus::Running);
        if let Err(err) = started {
            self.shared.clear_marker(id, run_id).await;
            warn!(task_id = %id, %run_id, %err, "could not start run");
            return Err(err);
        }

        info!(task_id = %id, %run_id, "run started");
        let shared = Arc::clone(&self.shared);
        self.shared
            .tracker
            .spawn(async move { shared.complete_after(id, run_id, cancel).await });

        Ok(StartOutcome::Started(run_id))
    }

    /// Counts per status over the current merged list.
    pub async fn status_counts(&self) -> StatusCounts {
        let tasks = self.list_tasks().await;
        count_by_status(&tasks)
    }

    /// Whether a simulated run for `id` is pending in this process.
    pub async fn is_running(&self, id: TaskId) -> bool {
        self.shared.in_flight.lock().await.contains_key(&id)
    }

    pub async fn running_ids(&self) -> Vec<TaskId> {
        let mut ids: Vec<_> = self.shared.in_flight.lock().await.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Poll until no run is pending for `id`.
    pub async fn wait_until_idle(&self, id: TaskId, poll: Duration) {
        while self.is_running(id).await {
            tokio::time::sleep(poll).await;
        }
    }

    /// Cancel every pending run and wait for the run tasks to exit.
    ///
    /// キャンセルされた実行は Completed を書かない（永続状態は Running のまま）。
    pub async fn shutdown(&self) {
        self.shared.tracker.close();
        for run in self.shared.in_flight.lock().await.values() {
            run.cancel.cancel();
        }
        self.shared.tracker.wait().await;
    }
}

impl<S, C> Shared<S, C>
where
    S: KvStore,
    C: Clock,
{
    async fn complete_after(&self, id: TaskId, run_id: RunId, cancel: CancellationToken) {
        tokio::select! {
            _ = tokio::time::sleep(SIMULATED_RUN_DURATION) => {
                let result = self.repo.lock().await.set_status(id, TaskStatus::Completed);
                match result {
                    Ok(task) => info!(task_id = %id, %run_id, at = %task.last_run_time, "run completed"),
                    Err(err) => error!(task_id = %id, %run_id, %err, "could not record run completion"),
                }
            }
            _ = cancel.cancelled() => {
                info!(task_id = %id, %run_id, "run cancelled before completion");
            }
        }

        // 結果に関わらずマーカーは外す
        self.clear_marker(id, run_id).await;
    }

    async fn clear_marker(&self, id: TaskId, run_id: RunId) {
        let mut in_flight = self.in_flight.lock().await;
        if in_flight.get(&id).is_some_and(|current| current.run_id == run_id) {
            in_flight.remove(&id);
        }
    }
}

fn require_name(name: &str) -> Result<(), TaskboardError> {
    if name.trim().is_empty() {
        return Err(TaskboardError::Validation("name must not be empty".to_string()));
    }
    Ok(())
}
