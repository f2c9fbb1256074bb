//! Fuzz target: JSON deserialization and validation of data record bodies.

#![no_main]

use ffgz_core::{CreateDataBody, UpdateDataBody};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(body) = serde_json::from_slice::<CreateDataBody>(data) {
        let _ = body.validate();
    }
    if let Ok(body) = serde_json::from_slice::<UpdateDataBody>(data) {
        let patch = body.into_patch();
        if let Some(freq) = patch.freq {
            assert_eq!(freq.min().is_some(), freq.max().is_some());
        }
    }
});
