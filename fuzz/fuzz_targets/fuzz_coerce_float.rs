//! Fuzz target: `coerce_float` on arbitrary text.
//!
//! Coercion swallows every malformed input; it must never panic and never
//! yield a non-finite value.

#![no_main]

use ffgz_core::{coerce_float, Scalar};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data).into_owned();
    if let Some(value) = coerce_float(Some(&Scalar::Text(text))) {
        assert!(value.is_finite());
    }
});
