//! Substring matching that reports where a search hit lands in the
//! original cell text.
//!
//! Two modes exist. `Identity` is a plain substring search. `Alphanumeric`
//! strips everything except ASCII letters and digits from both sides before
//! matching (phone numbers), then maps the hit back onto the unstripped
//! content so the punctuation survives in the displayed highlight.
//!
//! All offsets are character offsets (Unicode scalar values), not bytes.

use std::ops::Range;

use serde::Serialize;

/// Half-open `[start, end)` range of character offsets into a string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Bounds {
    pub start: usize,
    pub end: usize,
}

impl Bounds {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "bounds start {start} past end {end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The `(start, end)` pair, with `(0, 0)` standing in for "no match"
    /// when called as `find_bounds(..).unwrap_or_default().as_tuple()`.
    pub fn as_tuple(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Byte range in `content` covering these character offsets. Offsets
    /// past the end of `content` clamp to `content.len()`.
    pub fn byte_range(&self, content: &str) -> Range<usize> {
        let start = char_to_byte(content, self.start);
        let end = char_to_byte(content, self.end.max(self.start));
        start..end
    }

    /// Split `content` into the text before, inside and after the range.
    pub fn split<'a>(&self, content: &'a str) -> (&'a str, &'a str, &'a str) {
        let range = self.byte_range(content);
        (
            &content[..range.start],
            &content[range.clone()],
            &content[range.end..],
        )
    }
}

fn char_to_byte(content: &str, char_offset: usize) -> usize {
    content
        .char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(content.len())
}

/// How content and search are normalized before matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Plain substring search.
    #[default]
    Identity,
    /// Only ASCII letters and digits take part in matching.
    Alphanumeric,
}

/// Lower-case `s` one character at a time, keeping the first character of
/// each mapping so the result has as many characters as `s`. Offsets found
/// in the folded text therefore line up with `s`.
pub fn fold_case(s: &str) -> String {
    s.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

/// Case-insensitive containment test. Empty content or an empty search
/// never match.
pub fn has_match(content: &str, search: &str) -> bool {
    !search.is_empty() && !content.is_empty() && fold_case(content).contains(&fold_case(search))
}

/// Leftmost occurrence of `search` in `content`, case-sensitive.
///
/// Returns `None` for an empty search or when there is no occurrence.
/// Lower-case both arguments first for case-insensitive matching.
pub fn find_bounds(content: &str, search: &str) -> Option<Bounds> {
    if search.is_empty() {
        return None;
    }
    let byte_start = content.find(search)?;
    let start = content[..byte_start].chars().count();
    Some(Bounds::new(start, start + search.chars().count()))
}

/// Drop every character that is not an ASCII letter or digit.
pub fn clean_alphanumeric(s: &str) -> String {
    s.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Match on the alphanumeric characters of `content` and `search` only,
/// returning bounds into the unstripped `content`.
///
/// The start offset sits just after the last kept character preceding the
/// match, so punctuation between that character and the first matched one
/// is part of the range. Cleaning the returned slice always gives back the
/// cleaned search.
pub fn find_alphanumeric_bounds(content: &str, search: &str) -> Option<Bounds> {
    let cleaned = find_bounds(&clean_alphanumeric(content), &clean_alphanumeric(search))?;

    let chars: Vec<char> = content.chars().collect();
    let start = advance_kept(&chars, 0, cleaned.start);
    let end = advance_kept(&chars, start, cleaned.len());
    Some(Bounds::new(start, end))
}

/// Walk forward from `from` over `count` alphanumeric characters, skipping
/// any stripped characters in front of each. Stops at the end of `chars`.
fn advance_kept(chars: &[char], from: usize, count: usize) -> usize {
    let mut pos = from;
    for _ in 0..count {
        while pos < chars.len() && !chars[pos].is_ascii_alphanumeric() {
            pos += 1;
        }
        if pos >= chars.len() {
            break;
        }
        pos += 1;
    }
    pos.min(chars.len())
}

/// Dispatch to the finder for `mode`.
pub fn find_bounds_in(mode: MatchMode, content: &str, search: &str) -> Option<Bounds> {
    match mode {
        MatchMode::Identity => find_bounds(content, search),
        MatchMode::Alphanumeric => find_alphanumeric_bounds(content, search),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy(content: &str, search: &str) -> (usize, usize) {
        find_bounds(content, search).unwrap_or_default().as_tuple()
    }

    #[test]
    fn no_match_is_none() {
        assert_eq!(find_bounds("Hello, world!", "test"), None);
        assert_eq!(legacy("Hello, world!", "test"), (0, 0));
    }

    #[test]
    fn match_in_the_middle() {
        assert_eq!(legacy("Hello, world!", "world"), (7, 12));
    }

    #[test]
    fn first_occurrence_wins() {
        assert_eq!(
            legacy("Hello, world! This is a world of possibilities.", "world"),
            (7, 12)
        );
    }

    #[test]
    fn empty_search() {
        assert_eq!(find_bounds("Hello, world!", ""), None);
        assert_eq!(legacy("Hello, world!", ""), (0, 0));
    }

    #[test]
    fn empty_content() {
        assert_eq!(find_bounds("", "test"), None);
    }

    #[test]
    fn match_at_start_and_end() {
        assert_eq!(legacy("Hello, world!", "Hello"), (0, 5));
        assert_eq!(legacy("Hello, world!", "world!"), (7, 13));
    }

    #[test]
    fn find_bounds_is_case_sensitive() {
        assert_eq!(find_bounds("Hello", "hello"), None);
        assert_eq!(legacy("hello", "hello"), (0, 5));
    }

    #[test]
    fn offsets_count_characters_not_bytes() {
        let b = find_bounds("café crème", "crème").unwrap();
        assert_eq!(b.as_tuple(), (5, 10));
        assert_eq!(b.split("café crème"), ("café ", "crème", ""));
    }

    #[test]
    fn has_match_ignores_case() {
        assert!(has_match("Hello, World", "world"));
        assert!(has_match("hello", "HELLO"));
        assert!(!has_match("hello", "bye"));
        assert!(!has_match("hello", ""));
        assert!(!has_match("", "hello"));
    }

    #[test]
    fn fold_case_keeps_character_count() {
        // U+0130 lower-cases to two characters.
        assert_eq!("İstanbul".to_lowercase().chars().count(), 9);
        assert_eq!(fold_case("İstanbul"), "istanbul");
        assert_eq!(fold_case("ÉCOLE Ñ"), "école ñ");
        assert!(has_match("İstanbul", "ist"));
    }

    #[test]
    fn clean_phone_number() {
        assert_eq!(clean_alphanumeric("(555) 123-4567"), "5551234567");
        assert_eq!(clean_alphanumeric("a-b_c d"), "abcd");
        assert_eq!(clean_alphanumeric("naïve"), "nave");
        assert_eq!(clean_alphanumeric(""), "");
    }

    #[test]
    fn alphanumeric_bounds_from_start() {
        let content = "(555) 123-4567";
        let b = find_alphanumeric_bounds(content, "555").unwrap();
        assert_eq!(b.as_tuple(), (0, 4));
        assert_eq!(b.split(content).1, "(555");
    }

    #[test]
    fn alphanumeric_bounds_across_punctuation() {
        let content = "(555) 123-4567";
        let b = find_alphanumeric_bounds(content, "1234").unwrap();
        // Start lands just after the last '5'.
        assert_eq!(b.as_tuple(), (4, 11));
        assert_eq!(b.split(content).1, ") 123-4");
        assert_eq!(clean_alphanumeric(b.split(content).1), "1234");
    }

    #[test]
    fn alphanumeric_search_is_cleaned_too() {
        let content = "555.123.4567";
        let b = find_alphanumeric_bounds(content, "123-45").unwrap();
        assert_eq!(clean_alphanumeric(b.split(content).1), "12345");
    }

    #[test]
    fn alphanumeric_trailing_punctuation_stays_in_bounds() {
        let content = "555-1234---";
        let b = find_alphanumeric_bounds(content, "1234").unwrap();
        assert_eq!(b.as_tuple(), (3, 8));
        assert!(b.end <= content.chars().count());
    }

    #[test]
    fn alphanumeric_no_match() {
        assert_eq!(find_alphanumeric_bounds("(555) 123-4567", "999"), None);
        assert_eq!(find_alphanumeric_bounds("(555) 123-4567", "--"), None);
        assert_eq!(find_alphanumeric_bounds("---", "1"), None);
    }

    #[test]
    fn mode_dispatch() {
        assert_eq!(
            find_bounds_in(MatchMode::Identity, "555-1234", "5-1"),
            Some(Bounds::new(2, 5))
        );
        assert_eq!(
            find_bounds_in(MatchMode::Alphanumeric, "555-1234", "51"),
            Some(Bounds::new(2, 5))
        );
    }

    #[test]
    fn byte_range_past_end() {
        assert_eq!(Bounds::new(2, 9).byte_range("abc"), 2..3);
        assert_eq!(Bounds::new(5, 9).split("abc"), ("abc", "", ""));
    }

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn empty_search_never_matches(content in ".{0,40}") {
                prop_assert_eq!(find_bounds(&content, ""), None);
                prop_assert!(!has_match(&content, ""));
            }

            #[test]
            fn leftmost_occurrence(
                prefix in "[a-c ]{0,12}",
                needle in "[a-c]{1,4}",
                suffix in "[a-c ]{0,12}",
            ) {
                let content = format!("{prefix}{needle}{suffix}");
                let b = find_bounds(&content, &needle).unwrap();
                prop_assert_eq!(b.len(), needle.chars().count());
                prop_assert_eq!(b.split(&content).1, needle.as_str());
                // No earlier position also starts a match.
                for i in 0..b.start {
                    prop_assert!(!content[i..].starts_with(needle.as_str()));
                }
            }

            #[test]
            fn absent_search_gives_none(content in "[a-m]{0,20}", search in "[n-z]{1,5}") {
                prop_assert!(!has_match(&content, &search));
                prop_assert_eq!(find_bounds(&content, &search), None);
            }

            #[test]
            fn cleaning_is_idempotent(s in ".{0,40}") {
                let once = clean_alphanumeric(&s);
                prop_assert_eq!(clean_alphanumeric(&once), once);
            }

            #[test]
            fn alphanumeric_round_trip(
                content in "[0-9]{1,4}([()\\- .+é]{0,3}[0-9a-c]{1,4}){0,5}",
                start_seed in any::<usize>(),
                len_seed in any::<usize>(),
            ) {
                let cleaned = clean_alphanumeric(&content);
                let start = start_seed % cleaned.len();
                let len = 1 + len_seed % (cleaned.len() - start);
                let search = &cleaned[start..start + len];
                let b = find_alphanumeric_bounds(&content, search).unwrap();
                prop_assert!(b.start <= b.end);
                prop_assert!(b.end <= content.chars().count());
                let (_, matched, _) = b.split(&content);
                prop_assert_eq!(clean_alphanumeric(matched), search);
            }

            #[test]
            fn alphanumeric_bounds_always_in_range(content in ".{0,30}", search in ".{0,6}") {
                if let Some(b) = find_alphanumeric_bounds(&content, &search) {
                    prop_assert!(b.start <= b.end);
                    prop_assert!(b.end <= content.chars().count());
                }
            }
        }
    }
}
