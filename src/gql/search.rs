use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Value, json};

use super::nest;
use crate::matcher::clean_alphanumeric;

/// Characters the backend treats as pattern wildcards inside `_ilike`.
static WILDCARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[_&]").expect("wildcard pattern is valid"));

/// Backslash-escape `_` and `&` so they match literally.
pub fn escape_wildcards(text: &str) -> String {
    WILDCARD.replace_all(text, r"\$0").into_owned()
}

/// Build a case-insensitive "contains" filter for `text` on the field at
/// `segments`.
///
/// The leaf is `{"_ilike": "%<escaped text>%"}`. When any segment of the
/// path is `phone` (so `user.phone` as well as `phone`), the text is reduced
/// to its letters and digits first. Empty text or no segments gives `{}`.
pub fn build_search_filter<S: AsRef<str>>(text: &str, segments: &[S]) -> Value {
    if text.is_empty() || segments.is_empty() {
        return json!({});
    }

    let text = if segments.iter().any(|s| s.as_ref() == "phone") {
        clean_alphanumeric(text)
    } else {
        text.to_string()
    };
    let predicate = json!({ "_ilike": format!("%{}%", escape_wildcards(&text)) });
    nest(segments, predicate)
}
