pub mod defaults;
pub mod model;

pub use model::{GeneralSettings, HistorySettings, Settings, ViewMode, CURRENT_SCHEMA_VERSION};
