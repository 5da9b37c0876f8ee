mod change_count;
mod common;
pub mod image;
mod local;

pub use change_count::FingerprintCounter;
pub use local::LocalClipboard;
