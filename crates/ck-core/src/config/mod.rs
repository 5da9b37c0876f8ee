//! # Pure Data Module / 纯数据模块
//!
//! Configuration DTOs mapped from `config.toml`. No validation happens here;
//! consumers clamp values through the helper accessors.

pub mod app_config;

pub use app_config::{AppConfig, ClipboardConfig, HistoryConfig, SearchConfig, StorageConfig};
