#![no_main]

use cellmark::gql::build_search_filter;
use cellmark::table::snake_path;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let (search, path) = text.split_once('\0').unwrap_or((text, "name"));
    let _ = build_search_filter(search, &snake_path(path));
});
