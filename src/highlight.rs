//! Splitting a table cell into the parts before, inside and after a
//! search hit.

use rayon::prelude::*;
use serde::Serialize;

use crate::matcher::{
    Bounds, MatchMode, clean_alphanumeric, find_bounds_in, fold_case, has_match,
};

/// Display text of a cell plus the range to emphasize, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub text: String,
    pub bounds: Option<Bounds>,
}

/// Borrowed view of a [`Highlight`] cut at its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    pub before: &'a str,
    pub matched: &'a str,
    pub after: &'a str,
}

impl Highlight {
    pub fn plain(text: String) -> Self {
        Self { text, bounds: None }
    }

    pub fn is_match(&self) -> bool {
        self.bounds.is_some()
    }

    pub fn segments(&self) -> Segments<'_> {
        match self.bounds {
            Some(bounds) => {
                let (before, matched, after) = bounds.split(&self.text);
                Segments {
                    before,
                    matched,
                    after,
                }
            }
            None => Segments {
                before: &self.text,
                matched: "",
                after: "",
            },
        }
    }
}

/// One highlighted input row. `line` is 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMatch {
    pub line: usize,
    pub highlight: Highlight,
}

/// Render a North American number as `(AAA) BBB-CCCC`, or
/// `+1 (AAA) BBB-CCCC` when it carries the country code. Anything that is
/// not 10 digits (or 11 with a leading `1`) comes back unchanged.
pub fn format_phone(raw: &str) -> String {
    let digits = clean_alphanumeric(raw);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return raw.to_string();
    }
    match digits.len() {
        10 => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        11 if digits.starts_with('1') => {
            format!("+1 ({}) {}-{}", &digits[1..4], &digits[4..7], &digits[7..])
        }
        _ => raw.to_string(),
    }
}

/// Compute the highlight for one cell.
///
/// In `Alphanumeric` mode the search is cleaned first and both sides are
/// phone-formatted for display; the bounds then point into the formatted
/// text. Matching is case-insensitive in both modes.
pub fn highlight_cell(content: &str, search: &str, mode: MatchMode) -> Highlight {
    let (search, display_search, display) = match mode {
        MatchMode::Identity => (search.to_string(), search.to_string(), content.to_string()),
        MatchMode::Alphanumeric => {
            let cleaned = clean_alphanumeric(search);
            let formatted = format_phone(&cleaned);
            (cleaned, formatted, format_phone(content))
        }
    };

    let gate = match mode {
        MatchMode::Identity => has_match(content, &search),
        MatchMode::Alphanumeric => has_match(&clean_alphanumeric(content), &search),
    };
    if !gate {
        return Highlight::plain(display);
    }

    let bounds = find_bounds_in(mode, &fold_case(&display), &fold_case(&display_search));

    Highlight {
        text: display,
        bounds,
    }
}

/// Highlight every row against the same search. Rows are processed in
/// parallel; the output keeps input order.
pub fn highlight_rows<S>(rows: &[S], search: &str, mode: MatchMode) -> Vec<CellMatch>
where
    S: AsRef<str> + Sync,
{
    rows.par_iter()
        .enumerate()
        .map(|(idx, row)| CellMatch {
            line: idx + 1,
            highlight: highlight_cell(row.as_ref(), search, mode),
        })
        .collect()
}
