mod update_history_limit;

pub use update_history_limit::{UpdateHistoryLimit, UpdateHistoryLimitError};
