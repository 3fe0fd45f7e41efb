//! taskboard-core
//!
//! Task lifecycle and local persistence for the taskboard dashboard.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, status, category, icon, task, seed, errors）
//! - **ports**: 抽象化レイヤー（KvStore, Clock, IdGenerator）
//! - **impls**: 実装（InMemoryKvStore, JsonFileStore）
//! - **store**: KvStore 上の JSON 読み書き（読み込みは失敗しない）
//! - **repository**: seed set と永続 overlay のマージ
//! - **app**: builder, lifecycle controller, 集計, テーマ, レポート
//! - **config**: TOML 設定

pub mod domain;
pub mod ports;
pub mod impls;
pub mod store;
pub mod repository;
pub mod app;
pub mod config;

pub use app::{StartOutcome, Taskboard, TaskboardBuilder, TaskController};
pub use config::TaskboardConfig;
pub use domain::{Task, TaskDraft, TaskId, TaskPatch, TaskStatus, TaskboardError};
