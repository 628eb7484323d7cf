pub mod json;
pub mod text;

use std::io::Write;

use crate::highlight::CellMatch;

pub trait Formatter {
    /// Write `rows` to `out`. `rows_searched` counts every input row,
    /// including any filtered out before formatting.
    fn format_to(&self, rows: &[CellMatch], rows_searched: usize, out: &mut dyn Write);

    fn print(&self, rows: &[CellMatch], rows_searched: usize) {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.format_to(rows, rows_searched, &mut lock);
    }
}

pub fn create_formatter(format: &str, color: bool) -> Box<dyn Formatter> {
    match format {
        "json" => Box::new(json::JsonFormatter),
        // "text" and any unknown value
        _ => Box::new(text::TextFormatter::new(color)),
    }
}
