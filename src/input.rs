use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Read table rows, one per line, from every file in `paths` in order.
/// An empty `paths` reads stdin instead.
pub fn read_rows(paths: &[PathBuf]) -> Result<Vec<String>> {
    if paths.is_empty() {
        return read_rows_from(std::io::stdin().lock()).context("failed to read stdin");
    }

    let mut rows = Vec::new();
    for path in paths {
        rows.extend(read_file_rows(path)?);
    }
    Ok(rows)
}

fn read_file_rows(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        anyhow::bail!("path does not exist: {}", path.display());
    }
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    read_rows_from(file).with_context(|| format!("failed to read {}", path.display()))
}

/// Split a reader into lines. Both `\n` and `\r\n` end a line.
pub fn read_rows_from<R: Read>(reader: R) -> Result<Vec<String>> {
    let rows = BufReader::new(reader)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()?;
    Ok(rows)
}
