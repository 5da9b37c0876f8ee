//! Port interfaces for the application layer
//!
//! Ports define the contract between the history engine (use cases and the
//! history manager) and infrastructure implementations. The engine only ever
//! holds `Arc<dyn ...Port>` values, so storage, the system pasteboard, the
//! clock and settings can be swapped in tests.
//!
//! ## Port Placement Guidelines
//!
//! A port belongs here when it represents a capability the engine needs and
//! is implemented by the infrastructure or platform layer.

pub mod clipboard;
mod clipboard_change_handler;
mod clock;
pub mod settings;

pub use clipboard::*;
pub use clipboard_change_handler::ClipboardChangeHandler;
pub use clock::*;
pub use settings::SettingsPort;
