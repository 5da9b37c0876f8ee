use std::ops::Range;

use super::ClipboardItem;

/// Keyword filter over the history.
///
/// An empty keyword keeps everything in order. Otherwise only text items whose
/// content contains the keyword (case-insensitive) survive; image items never
/// match a keyword.
pub fn filter_items(items: &[ClipboardItem], keyword: &str) -> Vec<ClipboardItem> {
    if keyword.is_empty() {
        return items.to_vec();
    }

    let needle = keyword.to_lowercase();
    items
        .iter()
        .filter(|item| matches_lowercased(item, &needle))
        .cloned()
        .collect()
}

pub fn matches_keyword(item: &ClipboardItem, keyword: &str) -> bool {
    keyword.is_empty() || matches_lowercased(item, &keyword.to_lowercase())
}

fn matches_lowercased(item: &ClipboardItem, needle: &str) -> bool {
    item.text_content()
        .map(|text| text.to_lowercase().contains(needle))
        .unwrap_or(false)
}

/// Byte ranges in `text` matching `keyword` case-insensitively, left to right
/// and non-overlapping. Ranges always fall on char boundaries of `text`.
pub fn highlight_ranges(text: &str, keyword: &str) -> Vec<Range<usize>> {
    if keyword.is_empty() {
        return Vec::new();
    }

    let needle: Vec<char> = keyword.chars().flat_map(char::to_lowercase).collect();
    let hay: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |idx: usize| hay.get(idx).map(|(b, _)| *b).unwrap_or(text.len());

    let mut ranges = Vec::new();
    let mut start = 0;
    while start < hay.len() {
        match match_end(&hay, start, &needle) {
            Some(end) => {
                ranges.push(byte_at(start)..byte_at(end));
                start = end;
            }
            None => start += 1,
        }
    }
    ranges
}

/// Char index just past a match of `needle` starting at `start`.
fn match_end(hay: &[(usize, char)], start: usize, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    let mut idx = start;
    while matched < needle.len() {
        let (_, c) = *hay.get(idx)?;
        for lower in c.to_lowercase() {
            if needle.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
        idx += 1;
    }
    Some(idx)
}
