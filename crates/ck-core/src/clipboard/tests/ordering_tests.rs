//! Tests for pin-aware history ordering.

use super::fixtures::*;
use crate::clipboard::*;

#[test]
fn test_pinned_items_sort_before_unpinned() {
    let mut items = vec![
        text_item("new", "n", 300),
        pinned(text_item("old-pinned", "p", 100)),
        text_item("mid", "m", 200),
    ];

    sort_history(&mut items);

    assert_eq!(ids(&items), vec!["old-pinned", "new", "mid"]);
    assert!(is_history_ordered(&items));
}

#[test]
fn test_recency_orders_each_pin_group() {
    let mut items = vec![
        pinned(text_item("p1", "a", 10)),
        text_item("u1", "b", 20),
        pinned(text_item("p2", "c", 30)),
        text_item("u2", "d", 40),
    ];

    sort_history(&mut items);

    assert_eq!(ids(&items), vec!["p2", "p1", "u2", "u1"]);
}

#[test]
fn test_sort_is_stable_for_equal_timestamps() {
    let mut items = vec![text_item("first", "a", 5), text_item("second", "b", 5)];
    sort_history(&mut items);
    assert_eq!(ids(&items), vec!["first", "second"]);
}

#[test]
fn test_detects_out_of_order_sequences() {
    let items = vec![text_item("old", "a", 1), pinned(text_item("p", "b", 2))];
    assert!(!is_history_ordered(&items));
}

#[test]
fn test_unpinned_insert_index() {
    let items = vec![
        pinned(text_item("p1", "a", 3)),
        pinned(text_item("p2", "b", 2)),
        text_item("u1", "c", 1),
    ];
    assert_eq!(unpinned_insert_index(&items), 2);

    let all_pinned = vec![pinned(text_item("p", "a", 1))];
    assert_eq!(unpinned_insert_index(&all_pinned), 1);

    assert_eq!(unpinned_insert_index(&[]), 0);
}
