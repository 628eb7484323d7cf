//! Builders for nested GraphQL query arguments.
//!
//! A dotted field path such as `booking.end_date` becomes one object level
//! per segment: `{"booking": {"end_date": <leaf>}}`.

pub mod order_by;
pub mod search;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use order_by::build_order_by;
pub use search::{build_search_filter, escape_wildcards};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn from_str(s: &str) -> Option<SortOrder> {
        match s.to_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrap `leaf` in one single-key object per segment, innermost last.
/// Empty segments are skipped; no segments at all gives `{}`.
pub(crate) fn nest<S: AsRef<str>>(segments: &[S], leaf: Value) -> Value {
    let keys: Vec<&str> = segments
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| !s.is_empty())
        .collect();
    let mut keys = keys.into_iter().rev();

    let Some(innermost) = keys.next() else {
        return Value::Object(Map::new());
    };
    keys.fold(single(innermost, leaf), |inner, key| single(key, inner))
}

fn single(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}
