mod fixtures;
mod ordering_tests;
mod search_tests;
