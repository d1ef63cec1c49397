//! Find and replace over the document text
//!
//! All positions are char indices, matching the editor cursor.

use std::ops::Range;

use super::snippets::char_to_byte;

fn chars_match(a: char, b: char, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a == b || a.to_lowercase().eq(b.to_lowercase())
    }
}

/// Every match of `query`, overlapping hits included
pub fn find_all(text: &str, query: &str, case_sensitive: bool) -> Vec<Range<usize>> {
    let needle: Vec<char> = query.chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }
    let haystack: Vec<char> = text.chars().collect();
    if haystack.len() < needle.len() {
        return Vec::new();
    }

    (0..=haystack.len() - needle.len())
        .filter(|&start| {
            needle
                .iter()
                .enumerate()
                .all(|(i, &c)| chars_match(haystack[start + i], c, case_sensitive))
        })
        .map(|start| start..start + needle.len())
        .collect()
}

/// Replace the chars in `range` with `replacement`
pub fn replace_range(text: &mut String, range: Range<usize>, replacement: &str) {
    let start = char_to_byte(text, range.start);
    let end = char_to_byte(text, range.end);
    text.replace_range(start..end, replacement);
}

/// Replace every non-overlapping match, left to right. Returns the count.
pub fn replace_all(text: &mut String, query: &str, replacement: &str, case_sensitive: bool) -> usize {
    let mut selected: Vec<Range<usize>> = Vec::new();
    for range in find_all(text, query, case_sensitive) {
        if selected.last().map_or(true, |last| range.start >= last.end) {
            selected.push(range);
        }
    }

    for range in selected.iter().rev() {
        replace_range(text, range.clone(), replacement);
    }
    selected.len()
}

/// Find bar state
#[derive(Debug, Default, Clone)]
pub struct SearchState {
    pub query: String,
    pub replacement: String,
    pub case_sensitive: bool,
    matches: Vec<Range<usize>>,
    current: usize,
}

impl SearchState {
    /// Recompute matches, keeping the current index where possible
    pub fn update(&mut self, text: &str) {
        self.matches = find_all(text, &self.query, self.case_sensitive);
        if self.current >= self.matches.len() {
            self.current = 0;
        }
    }

    pub fn current(&self) -> Option<Range<usize>> {
        self.matches.get(self.current).cloned()
    }

    pub fn next(&mut self) -> Option<Range<usize>> {
        if self.matches.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.matches.len();
        self.current()
    }

    pub fn prev(&mut self) -> Option<Range<usize>> {
        if self.matches.is_empty() {
            return None;
        }
        self.current = (self.current + self.matches.len() - 1) % self.matches.len();
        self.current()
    }

    /// 1-based position and total, if there are matches
    pub fn counter(&self) -> Option<(usize, usize)> {
        if self.matches.is_empty() {
            None
        } else {
            Some((self.current + 1, self.matches.len()))
        }
    }

    /// Replace the current match and refresh
    pub fn replace_current(&mut self, text: &mut String) -> bool {
        let Some(range) = self.current() else {
            return false;
        };
        replace_range(text, range, &self.replacement);
        self.update(text);
        true
    }

    /// Replace all matches and refresh
    pub fn replace_all(&mut self, text: &mut String) -> usize {
        let count = replace_all(text, &self.query, &self.replacement, self.case_sensitive);
        self.current = 0;
        self.update(text);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_overlapping() {
        assert_eq!(find_all("aaaa", "aa", true), vec![0..2, 1..3, 2..4]);
        assert!(find_all("abc", "", true).is_empty());
        assert!(find_all("ab", "abc", true).is_empty());
    }

    #[test]
    fn test_find_case_insensitive_chars() {
        let text = "Ñu ñu ÑU";
        assert_eq!(find_all(text, "ñu", false), vec![0..2, 3..5, 6..8]);
        assert_eq!(find_all(text, "ñu", true), vec![3..5]);
    }

    #[test]
    fn test_replace_all_non_overlapping() {
        let mut text = "aaaa".to_string();
        assert_eq!(replace_all(&mut text, "aa", "b", true), 2);
        assert_eq!(text, "bb");

        let mut text = "Cat cat CAT".to_string();
        assert_eq!(replace_all(&mut text, "cat", "dog", false), 3);
        assert_eq!(text, "dog dog dog");
    }

    #[test]
    fn test_replace_range_multibyte() {
        let mut text = "año nuevo".to_string();
        replace_range(&mut text, 0..3, "year");
        assert_eq!(text, "year nuevo");
    }

    #[test]
    fn test_state_navigation() {
        let mut state = SearchState {
            query: "x".to_string(),
            ..SearchState::default()
        };
        state.update("x-x-x");
        assert_eq!(state.counter(), Some((1, 3)));
        assert_eq!(state.next(), Some(2..3));
        assert_eq!(state.next(), Some(4..5));
        assert_eq!(state.next(), Some(0..1));
        assert_eq!(state.prev(), Some(4..5));
        assert_eq!(state.counter(), Some((3, 3)));
    }

    #[test]
    fn test_state_replace() {
        let mut text = "one two one".to_string();
        let mut state = SearchState {
            query: "one".to_string(),
            replacement: "1".to_string(),
            ..SearchState::default()
        };
        state.update(&text);
        assert!(state.replace_current(&mut text));
        assert_eq!(text, "1 two one");
        assert_eq!(state.counter(), Some((1, 1)));

        assert_eq!(state.replace_all(&mut text), 1);
        assert_eq!(text, "1 two 1");
        assert_eq!(state.counter(), None);
        assert!(!state.replace_current(&mut text));
    }
}
