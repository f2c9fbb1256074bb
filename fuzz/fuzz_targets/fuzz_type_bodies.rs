//! Fuzz target: JSON deserialization and validation of type record bodies.
//!
//! Arbitrary bytes fed to the create and update body parsers must never
//! panic; parse errors are expected and fine.

#![no_main]

use ffgz_core::{CreateTypeBody, UpdateTypeBody};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(body) = serde_json::from_slice::<CreateTypeBody>(data) {
        if let Ok(fields) = body.validate() {
            assert!(!fields.model.trim().is_empty());
        }
    }
    if let Ok(body) = serde_json::from_slice::<UpdateTypeBody>(data) {
        let _ = body.into_patch();
    }
});
