use std::process;

use clap::Parser;

use cellmark::cli::Args;

fn main() {
    let args = Args::parse();
    match cellmark::run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(2);
        }
    }
}
