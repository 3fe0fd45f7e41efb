//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryKvStore**: テスト・一時利用向け
//! - **JsonFileStore**: CLI 用のファイル永続化

pub mod file_store;
pub mod memory_store;

pub use self::file_store::JsonFileStore;
pub use self::memory_store::InMemoryKvStore;
