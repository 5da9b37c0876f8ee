mod debounce;

pub use debounce::KeywordDebouncer;
