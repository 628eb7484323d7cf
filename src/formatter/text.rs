use std::io::Write;

use crate::formatter::Formatter;
use crate::highlight::CellMatch;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// One line per row with the match in bold, or wrapped in `[` `]` when
/// color is off, followed by a summary line.
pub struct TextFormatter {
    color: bool,
}

impl TextFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn markers(&self) -> (&'static str, &'static str) {
        if self.color { (BOLD, RESET) } else { ("[", "]") }
    }
}

impl Formatter for TextFormatter {
    fn format_to(&self, rows: &[CellMatch], rows_searched: usize, out: &mut dyn Write) {
        let (open, close) = self.markers();
        for row in rows {
            let s = row.highlight.segments();
            if row.highlight.is_match() {
                let _ = writeln!(out, "{}{open}{}{close}{}", s.before, s.matched, s.after);
            } else {
                let _ = writeln!(out, "{}", row.highlight.text);
            }
        }

        let matches = rows.iter().filter(|r| r.highlight.is_match()).count();
        let row_word = if rows_searched == 1 { "row" } else { "rows" };
        let match_word = if matches == 1 { "match" } else { "matches" };
        let _ = writeln!(
            out,
            "\n{rows_searched} {row_word} searched, {matches} {match_word} found"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::highlight_rows;
    use crate::matcher::MatchMode;

    fn render(cells: &[&str], search: &str, mode: MatchMode, color: bool) -> String {
        let rows = highlight_rows(cells, search, mode);
        let mut buf = Vec::new();
        TextFormatter::new(color).format_to(&rows, rows.len(), &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn brackets_without_color() {
        let out = render(&["Jane Doe", "John"], "doe", MatchMode::Identity, false);
        assert_eq!(out, "Jane [Doe]\nJohn\n\n2 rows searched, 1 match found\n");
    }

    #[test]
    fn bold_with_color() {
        let out = render(&["Jane Doe"], "jane", MatchMode::Identity, true);
        assert!(out.starts_with("\x1b[1mJane\x1b[0m Doe\n"));
        assert!(out.contains("1 row searched, 1 match found"));
    }

    #[test]
    fn phone_rows_are_formatted() {
        let out = render(&["5551234567"], "123", MatchMode::Alphanumeric, false);
        assert!(out.starts_with("(555[) 123]-4567\n"));
    }

    #[test]
    fn empty_input() {
        let out = render(&[], "x", MatchMode::Identity, false);
        assert_eq!(out, "\n0 rows searched, 0 matches found\n");
    }
}
