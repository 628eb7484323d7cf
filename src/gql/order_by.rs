use serde_json::Value;

use super::{SortOrder, nest};

/// Build an `order_by` argument from a dotted path.
///
/// `build_order_by("booking.end_date", SortOrder::Desc)` gives
/// `{"booking": {"end_date": "desc"}}`. An empty path gives `{}`.
pub fn build_order_by(path: &str, order: SortOrder) -> Value {
    let segments: Vec<&str> = path.split('.').collect();
    nest(&segments, Value::String(order.as_str().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_path() {
        assert_eq!(
            build_order_by("booking.end_date", SortOrder::Desc),
            json!({"booking": {"end_date": "desc"}})
        );
    }

    #[test]
    fn single_segment() {
        assert_eq!(
            build_order_by("created_at", SortOrder::Asc),
            json!({"created_at": "asc"})
        );
    }

    #[test]
    fn empty_path() {
        assert_eq!(build_order_by("", SortOrder::Asc), json!({}));
    }

    #[test]
    fn deep_path() {
        assert_eq!(
            build_order_by("location.market.display_name", SortOrder::Asc),
            json!({"location": {"market": {"display_name": "asc"}}})
        );
    }
}
