//! Process bootstrap: logging, configuration, dependency wiring and the
//! main run loop.

pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use wiring::{wire, AppRuntime};
