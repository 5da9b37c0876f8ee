//! # ck-core
//!
//! Core domain models and business logic for Clipkeep.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod clipboard;
pub mod config;
pub mod ids;
pub mod ports;
pub mod settings;

// Re-export commonly used types at the crate root
pub use clipboard::{
    ChangeCount, ClipboardItem, HistoryLimit, ItemContent, ItemKind, ObservedChangeCount,
    PasteboardContent, TimestampMs,
};
pub use config::AppConfig;
pub use ids::ItemId;
pub use settings::model::Settings;
