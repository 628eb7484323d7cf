#![no_main]

use cellmark::highlight::highlight_cell;
use cellmark::matcher::{MatchMode, clean_alphanumeric, find_alphanumeric_bounds};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let (content, search) = text.split_once('\0').unwrap_or((text, ""));

    if let Some(bounds) = find_alphanumeric_bounds(content, search) {
        assert!(bounds.end <= content.chars().count());
        let (_, matched, _) = bounds.split(content);
        assert_eq!(clean_alphanumeric(matched), clean_alphanumeric(search));
    }

    for mode in [MatchMode::Identity, MatchMode::Alphanumeric] {
        let _ = highlight_cell(content, search, mode).segments();
    }
});
