use std::io::Write;

use serde::Serialize;

use crate::formatter::Formatter;
use crate::highlight::CellMatch;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    metadata: Metadata,
    rows: Vec<Row<'a>>,
}

#[derive(Serialize)]
struct Metadata {
    rows_searched: usize,
    match_count: usize,
}

#[derive(Serialize)]
struct Row<'a> {
    line: usize,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched: Option<&'a str>,
}

impl Formatter for JsonFormatter {
    fn format_to(&self, rows: &[CellMatch], rows_searched: usize, out: &mut dyn Write) {
        let output = JsonOutput {
            metadata: Metadata {
                rows_searched,
                match_count: rows.iter().filter(|r| r.highlight.is_match()).count(),
            },
            rows: rows
                .iter()
                .map(|r| {
                    let bounds = r.highlight.bounds;
                    Row {
                        line: r.line,
                        text: &r.highlight.text,
                        start: bounds.map(|b| b.start),
                        end: bounds.map(|b| b.end),
                        matched: bounds.map(|_| r.highlight.segments().matched),
                    }
                })
                .collect(),
        };
        // Safe to unwrap: our types always serialize successfully
        let _ = writeln!(out, "{}", serde_json::to_string_pretty(&output).unwrap());
    }
}
