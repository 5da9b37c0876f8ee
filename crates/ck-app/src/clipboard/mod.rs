mod writer;

pub use writer::ClipboardWriter;
