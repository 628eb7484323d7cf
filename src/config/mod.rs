use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::gql::SortOrder;
use crate::table::{ColumnDef, ROWS_PER_PAGE_OPTIONS};

/// Name of the table definition file looked up in the target directory.
pub const CONFIG_FILE_NAME: &str = ".cellmark.yml";

/// Table definition loaded from `.cellmark.yml`.
///
/// ```yaml
/// identifier: accounts
/// rows_per_page: 20
/// order_by: startDate
/// order: asc
/// phone_fields: [phone]
/// columns:
///   - field: name
///     search_path: user.displayName
///     cell_type: user_name
/// query_filters:
///   - status: { _eq: active }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    pub identifier: String,
    pub columns: Vec<ColumnDef>,
    pub rows_per_page: usize,
    /// camelCase field path of the initial sort, if any.
    pub order_by: Option<String>,
    pub order: SortOrder,
    /// Backend filters always and-ed into the where-clause.
    pub query_filters: Vec<Value>,
    /// Fields whose values are phone numbers (matched on letters and digits only).
    pub phone_fields: Vec<String>,
    #[serde(skip)]
    source: Option<PathBuf>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            identifier: "table".to_string(),
            columns: Vec::new(),
            rows_per_page: ROWS_PER_PAGE_OPTIONS[0],
            order_by: None,
            order: SortOrder::default(),
            query_filters: Vec::new(),
            phone_fields: Vec::new(),
            source: None,
        }
    }
}

impl TableConfig {
    /// File this config was read from, `None` for the built-in default.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Whether `field` holds phone numbers, either listed in
    /// `phone_fields` or declared as a `phone_number` column.
    pub fn is_phone_field(&self, field: &str) -> bool {
        self.phone_fields.iter().any(|f| f == field)
            || self.columns.iter().any(|c| {
                c.field == field && c.cell_type == crate::table::CellType::PhoneNumber
            })
    }

    pub fn column(&self, field: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.field == field)
    }

    fn validate(&self) -> Result<()> {
        if !ROWS_PER_PAGE_OPTIONS.contains(&self.rows_per_page) {
            anyhow::bail!(
                "rows_per_page must be one of {:?}, got {}",
                ROWS_PER_PAGE_OPTIONS,
                self.rows_per_page
            );
        }
        for (i, column) in self.columns.iter().enumerate() {
            if column.field.is_empty() {
                anyhow::bail!("column {i} has no field");
            }
        }
        Ok(())
    }
}

/// Load the table definition from `path`, or look for `.cellmark.yml` in
/// `target_dir` (current directory when `None`). A missing default file
/// yields the built-in config; a missing explicit file is an error.
pub fn load_config(path: Option<&Path>, target_dir: Option<&Path>) -> Result<TableConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("config file does not exist: {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let candidate = target_dir.unwrap_or(Path::new(".")).join(CONFIG_FILE_NAME);
            if !candidate.exists() {
                return Ok(TableConfig::default());
            }
            candidate
        }
    };

    let contents = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config {}", config_path.display()))?;
    let mut config = parse_config(&contents)
        .with_context(|| format!("failed to parse {}", config_path.display()))?;
    config.source = Some(config_path);
    Ok(config)
}

/// Parse and validate a table definition from YAML text. An empty document
/// gives the built-in default.
pub fn parse_config(contents: &str) -> Result<TableConfig> {
    if contents.trim().is_empty() {
        return Ok(TableConfig::default());
    }
    let config: TableConfig = serde_yml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}
