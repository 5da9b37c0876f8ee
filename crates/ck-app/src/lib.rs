//! Clipkeep application layer
//!
//! Owns the in-memory clipboard history and orchestrates the ports defined
//! in `ck-core`: capture from the pasteboard, write-behind persistence,
//! keyword filtering and copying items back to the pasteboard.

pub mod clipboard;
pub mod history;
pub mod search;
pub mod usecases;

pub use clipboard::ClipboardWriter;
pub use history::{
    HistoryManager, HistoryView, IngestOutcome, PersistenceOp, PersistenceOpKind,
    PersistenceOutcome,
};
pub use search::KeywordDebouncer;
