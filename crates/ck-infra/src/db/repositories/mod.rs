mod clipboard_item_repo;

pub use clipboard_item_repo::*;
