//! App - アプリケーション層
//!
//! repository と ports を組み合わせて、view 層に渡す操作を提供します。
//!
//! # 主要コンポーネント
//! - **TaskboardBuilder**: 構築とワイヤリング
//! - **TaskController**: 作成・更新・シミュレーション実行（status を変えるのはここだけ）
//! - **StatusCounts**: ステータス別集計
//! - **ThemePreference**: ダークモード設定
//! - **TaskReport**: タスク単位のログレポート

pub mod builder;
pub mod controller;
pub mod report;
pub mod status;
pub mod theme;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, Taskboard, TaskboardBuilder};
pub use self::controller::{SIMULATED_RUN_DURATION, StartOutcome, TaskController};
pub use self::report::TaskReport;
pub use self::status::{StatusCounts, count_by_status};
pub use self::theme::ThemePreference;
