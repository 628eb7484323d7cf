use std::path::PathBuf;

use clap::Parser;

use crate::config::TableConfig;
use crate::matcher::MatchMode;

#[derive(Parser, Debug)]
#[command(
    name = "cellmark",
    version,
    about = "Highlight search hits in table cells and build grid query arguments"
)]
pub struct Args {
    /// Files whose lines are table cells (reads stdin when omitted)
    pub paths: Vec<PathBuf>,

    /// Text to search for
    #[arg(short, long, value_name = "TEXT", default_value = "")]
    pub search: String,

    /// Match on letters and digits only and format cells as phone numbers
    #[arg(long)]
    pub phone: bool,

    /// Column the rows belong to; its configured cell type picks the match mode
    #[arg(long, value_name = "NAME")]
    pub field: Option<String>,

    /// Path to table definition file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,

    /// Print only rows containing a match
    #[arg(long)]
    pub only_matches: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Print the query variables for the configured table, then exit
    #[arg(long)]
    pub query_args: bool,

    /// Zero-based page for --query-args
    #[arg(long, default_value_t = 0)]
    pub page: usize,

    /// Page size for --query-args (10, 20, 35 or 50)
    #[arg(long, value_name = "N")]
    pub rows_per_page: Option<usize>,

    /// Click FIELD's column header for --query-args (repeat to toggle)
    #[arg(long, value_name = "FIELD")]
    pub sort: Vec<String>,
}

impl Args {
    /// Resolve the match mode. `--phone` wins; otherwise the column named
    /// by `--field` decides, defaulting to plain matching.
    pub fn match_mode(&self, config: &TableConfig) -> MatchMode {
        if self.phone {
            return MatchMode::Alphanumeric;
        }
        let Some(field) = self.field.as_deref() else {
            return MatchMode::Identity;
        };
        if config.is_phone_field(field) {
            return MatchMode::Alphanumeric;
        }
        config
            .column(field)
            .and_then(|c| c.cell_type.match_mode())
            .unwrap_or_default()
    }
}
