//! Tests for keyword filtering and highlighting.

use super::fixtures::*;
use crate::clipboard::*;

fn sample() -> Vec<ClipboardItem> {
    vec![
        pinned(text_item("p", "Pinned HELLO note", 40)),
        image_item("img", 30),
        text_item("t1", "hello world", 20),
        text_item("t2", "goodbye", 10),
    ]
}

#[test]
fn test_empty_keyword_returns_everything_in_order() {
    let items = sample();
    let filtered = filter_items(&items, "");
    assert_eq!(ids(&filtered), ids(&items));
}

#[test]
fn test_keyword_is_case_insensitive_and_order_preserving() {
    let filtered = filter_items(&sample(), "Hello");
    assert_eq!(ids(&filtered), vec!["p", "t1"]);
}

#[test]
fn test_images_never_match_keywords() {
    let filtered = filter_items(&sample(), "image");
    assert!(filtered.is_empty());

    let preview_match = filter_items(&sample(), "[");
    assert!(preview_match.iter().all(|item| item.kind() == ItemKind::Text));
}

#[test]
fn test_results_are_subset_of_input() {
    let items = sample();
    for keyword in ["o", "bye", "zzz", "NOTE"] {
        let filtered = filter_items(&items, keyword);
        assert!(filtered.iter().all(|item| items.contains(item)));
        assert!(filtered.iter().all(|item| matches_keyword(item, keyword)));
    }
}

#[test]
fn test_highlight_ranges_are_case_insensitive() {
    let text = "Hello hello HeLLo";
    let ranges = highlight_ranges(text, "hello");
    assert_eq!(ranges, vec![0..5, 6..11, 12..17]);
}

#[test]
fn test_highlight_ranges_do_not_overlap() {
    assert_eq!(highlight_ranges("aaaa", "aa"), vec![0..2, 2..4]);
}

#[test]
fn test_highlight_ranges_respect_char_boundaries() {
    let text = "复制 Copy 复制";
    let ranges = highlight_ranges(text, "复制");
    assert_eq!(ranges.len(), 2);
    for range in ranges {
        assert_eq!(&text[range], "复制");
    }
}

#[test]
fn test_highlight_ranges_empty_keyword() {
    assert!(highlight_ranges("anything", "").is_empty());
}
