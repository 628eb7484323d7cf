pub mod cli;
pub mod config;
pub mod formatter;
pub mod gql;
pub mod highlight;
pub mod input;
pub mod matcher;
pub mod table;

use std::time::Instant;

use anyhow::Result;

use cli::Args;
use config::{TableConfig, load_config};
use formatter::create_formatter;
use highlight::highlight_rows;
use input::read_rows;
use table::TableState;

/// Run the tool. Returns the exit code: 0 = at least one row matched (or
/// a non-search command succeeded), 1 = no row matched.
pub fn run(args: Args) -> Result<i32> {
    let target_dir = args.paths.first().map(|p| {
        if p.is_file() {
            p.parent().unwrap_or(p)
        } else {
            p.as_path()
        }
    });
    let config = load_config(args.config.as_deref(), target_dir)?;

    if args.debug {
        match config.source() {
            Some(path) => eprintln!("debug: config loaded from: {}", path.display()),
            None => eprintln!("debug: no config file found"),
        }
        eprintln!(
            "debug: table {:?}: {} columns, {} query filters",
            config.identifier,
            config.columns.len(),
            config.query_filters.len()
        );
    }

    // --query-args: print the variables for the table query and exit
    if args.query_args {
        let state = table_state(&args, &config)?;
        let variables = state.query_variables(&config);
        println!("{}", serde_json::to_string_pretty(&variables)?);
        return Ok(0);
    }

    let rows = read_rows(&args.paths)?;
    let mode = args.match_mode(&config);

    if args.debug {
        eprintln!("debug: {} rows to search, mode {mode:?}", rows.len());
    }

    let start = Instant::now();
    let mut matches = highlight_rows(&rows, &args.search, mode);
    let matched = matches.iter().filter(|m| m.highlight.is_match()).count();

    if args.debug {
        eprintln!("debug: highlighted in {:.0?}, {matched} matches", start.elapsed());
    }

    if args.only_matches {
        matches.retain(|m| m.highlight.is_match());
    }

    let formatter = create_formatter(&args.format, !args.no_color);
    formatter.print(&matches, rows.len());

    if matched > 0 { Ok(0) } else { Ok(1) }
}

/// Table state after applying the page size, header clicks, search and
/// page requested on the command line, in that order.
pub fn table_state(args: &Args, config: &TableConfig) -> Result<TableState> {
    let mut state = TableState::from_config(config)?;
    if let Some(rows_per_page) = args.rows_per_page {
        state.pagination.set_rows_per_page(rows_per_page)?;
    }
    for field in &args.sort {
        state.sort_by(field);
    }
    state.set_search(&args.search);
    state.pagination.page = args.page;
    Ok(state)
}
