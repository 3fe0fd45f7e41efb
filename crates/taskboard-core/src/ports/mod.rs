//! Ports - 抽象化レイヤー
//!
//! 外部の媒体（localStorage 相当のストレージ、時計、ID 採番）へのインターフェース。
//! 実装は [`crate::impls`] に置く。

pub mod clock;
pub mod id_generator;
pub mod kv_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{ClockIdGenerator, IdGenerator};
pub use self::kv_store::{KvStore, StoreError};
