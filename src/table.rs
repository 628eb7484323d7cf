//! Query-variable assembly for one page of a data grid: where-clause,
//! order-by, limit/offset, sort toggling and pagination state.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::TableConfig;
use crate::gql::{SortOrder, build_order_by, build_search_filter};
use crate::matcher::MatchMode;

/// Page sizes offered to the user.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 4] = [10, 20, 35, 50];

pub const DEFAULT_COLUMN_WIDTH: usize = 180;

/// Field sorted on when the user has not picked a column.
pub const DEFAULT_SORT_FIELD: &str = "updated_at";

/// How a column's cells are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    UserName,
    PhoneNumber,
    Chip,
    Date,
    Price,
    #[default]
    #[serde(other)]
    Text,
}

impl CellType {
    /// Match mode used to highlight search hits, or `None` for cells that
    /// never highlight.
    pub fn match_mode(&self) -> Option<MatchMode> {
        match self {
            CellType::UserName | CellType::Text => Some(MatchMode::Identity),
            CellType::PhoneNumber => Some(MatchMode::Alphanumeric),
            CellType::Chip | CellType::Date | CellType::Price => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnDef {
    pub field: String,
    pub header_name: String,
    /// Dotted camelCase path searched on the backend, e.g. `location.market.displayName`.
    pub search_path: Option<String>,
    pub cell_type: CellType,
    pub width: Option<usize>,
}

impl ColumnDef {
    pub fn width(&self) -> usize {
        self.width.unwrap_or(DEFAULT_COLUMN_WIDTH)
    }
}

/// Convert `camelCase`, `PascalCase` or space separated words to `snake_case`.
/// Runs of digits form their own word (`address2` gives `address_2`).
pub fn snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let case_boundary = c.is_uppercase()
                && (prev.is_lowercase() || (prev.is_uppercase() && next_is_lower));
            let digit_boundary = c.is_ascii_digit() != prev.is_ascii_digit();
            if case_boundary || digit_boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words.join("_")
}

/// Split a dotted path and snake-case each segment.
pub fn snake_path(path: &str) -> Vec<String> {
    path.split('.')
        .map(snake_case)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Backend path segments for every searchable column.
pub fn search_paths(columns: &[ColumnDef]) -> Vec<Vec<String>> {
    columns
        .iter()
        .filter_map(|c| c.search_path.as_deref())
        .map(snake_path)
        .filter(|segments| !segments.is_empty())
        .collect()
}

/// `{"_and": [...query_filters, {"_or": [search filter per column]}]}`.
///
/// The `_or` element is left out when the search is empty or no column is
/// searchable.
pub fn build_where(query_filters: &[Value], columns: &[ColumnDef], search: &str) -> Value {
    let mut and: Vec<Value> = query_filters.to_vec();

    let paths = search_paths(columns);
    if !search.is_empty() && !paths.is_empty() {
        let or: Vec<Value> = paths
            .iter()
            .map(|segments| build_search_filter(search, segments))
            .collect();
        and.push(json!({ "_or": or }));
    }

    json!({ "_and": and })
}

/// `{"updated_at": "desc"}`.
pub fn default_order_by() -> Value {
    build_order_by(DEFAULT_SORT_FIELD, SortOrder::Desc)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// camelCase field path as the UI knows it.
    pub order_by: Option<String>,
    pub order: SortOrder,
}

impl SortState {
    /// Sort state after the user clicks `field`'s header. Clicking the
    /// column already sorted ascending flips it to descending; any other
    /// click sorts ascending.
    pub fn toggle(&self, field: &str) -> SortState {
        let order = if self.order_by.as_deref() == Some(field) && self.order == SortOrder::Asc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        SortState {
            order_by: Some(field.to_string()),
            order,
        }
    }

    /// Backend `order_by` argument, falling back to [`default_order_by`].
    pub fn order_by_argument(&self) -> Value {
        match self.order_by.as_deref().map(snake_path) {
            Some(segments) if !segments.is_empty() => {
                build_order_by(&segments.join("."), self.order)
            }
            _ => default_order_by(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub rows_per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            rows_per_page: ROWS_PER_PAGE_OPTIONS[0],
        }
    }
}

impl Pagination {
    pub fn new(rows_per_page: usize) -> Result<Self> {
        validate_rows_per_page(rows_per_page)?;
        Ok(Self {
            page: 0,
            rows_per_page,
        })
    }

    /// Change the page size and go back to the first page.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> Result<()> {
        validate_rows_per_page(rows_per_page)?;
        self.rows_per_page = rows_per_page;
        self.page = 0;
        Ok(())
    }

    /// Rows to request: one more than shown, to detect a following page.
    pub fn limit(&self) -> usize {
        self.rows_per_page + 1
    }

    pub fn offset(&self) -> usize {
        self.rows_per_page * self.page
    }

    pub fn can_go_back(&self) -> bool {
        self.page > 0
    }

    pub fn can_go_forward(&self, num_results: usize, is_more_data: bool) -> bool {
        num_results >= self.rows_per_page && is_more_data
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Footer text describing the rows on screen.
    pub fn label(&self, rows_len: usize, is_fetching: bool, is_more_data: bool) -> String {
        let from = self.offset() + 1;
        if is_fetching {
            "L O A D I N G . . .".to_string()
        } else if rows_len == 0 {
            "Showing 0 -- No results".to_string()
        } else if is_more_data {
            let to = self.offset() + self.rows_per_page;
            format!("Showing {from} - {to} -- of more than {to}")
        } else {
            format!("Showing {from} - {} -- end of results", from + rows_len - 1)
        }
    }
}

fn validate_rows_per_page(rows_per_page: usize) -> Result<()> {
    if !ROWS_PER_PAGE_OPTIONS.contains(&rows_per_page) {
        anyhow::bail!(
            "rows per page must be one of {:?}, got {rows_per_page}",
            ROWS_PER_PAGE_OPTIONS
        );
    }
    Ok(())
}

/// Rows fetched for one page, with the look-ahead row removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice<T> {
    pub rows: Vec<T>,
    pub is_more_data: bool,
}

impl<T> PageSlice<T> {
    pub fn from_rows(mut rows: Vec<T>, rows_per_page: usize) -> Self {
        let is_more_data = rows.len() > rows_per_page;
        if is_more_data {
            rows.truncate(rows_per_page);
        }
        Self { rows, is_more_data }
    }
}

/// Variables sent with the table's subscription query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryVariables {
    pub filters: Value,
    pub limit: usize,
    pub offset: usize,
    pub order_by: Value,
}

/// User-controlled state of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    pub pagination: Pagination,
    pub sort: SortState,
    pub search: String,
}

impl TableState {
    /// Initial state from a table definition.
    pub fn from_config(config: &TableConfig) -> Result<Self> {
        Ok(Self {
            pagination: Pagination::new(config.rows_per_page)?,
            sort: SortState {
                order_by: config.order_by.clone(),
                order: config.order,
            },
            search: String::new(),
        })
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.trim().to_string();
        self.pagination.page = 0;
    }

    pub fn sort_by(&mut self, field: &str) {
        self.sort = self.sort.toggle(field);
        self.pagination.page = 0;
    }

    /// Filters changed elsewhere; start over from the first page.
    pub fn filters_changed(&mut self) {
        self.pagination.page = 0;
    }

    pub fn query_variables(&self, config: &TableConfig) -> QueryVariables {
        QueryVariables {
            filters: build_where(&config.query_filters, &config.columns, &self.search),
            limit: self.pagination.limit(),
            offset: self.pagination.offset(),
            order_by: self.sort.order_by_argument(),
        }
    }
}
