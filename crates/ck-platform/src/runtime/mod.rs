pub mod clipboard_poller;
