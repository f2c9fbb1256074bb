//! Fuzz target: `parse_range` on arbitrary text.
//!
//! The parser must never panic, must never produce a half-set band, and any
//! band it does produce must survive a format/parse cycle when its lower
//! bound is non-negative.

#![no_main]

use ffgz_core::{format_range, parse_range};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let range = parse_range(Some(text));
    assert_eq!(range.min().is_some(), range.max().is_some(), "half-set band from {text:?}");

    if let Some((min, max)) = range.bounds() {
        if min >= 0 && max >= 0 {
            let again = parse_range(Some(&format_range(Some(min), Some(max))));
            assert_eq!(again, range, "format/parse cycle changed {text:?}");
        }
    }
});
