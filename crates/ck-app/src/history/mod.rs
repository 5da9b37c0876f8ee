//! History manager: the single owner of the clipboard history collection.
//!
//! Every mutation runs synchronously under one lock, publishes a fresh
//! [`HistoryView`] and hands the matching store writes to the write-behind
//! queue. Memory is authoritative; a failed store write is logged and never
//! rolled back.

mod manager;
mod state;
mod view;
mod write_behind;

pub use manager::HistoryManager;
pub use state::IngestOutcome;
pub use view::HistoryView;
pub use write_behind::{PersistenceOp, PersistenceOpKind, PersistenceOutcome};
