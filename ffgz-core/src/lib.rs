//! Core types for the FFGZ record service.
//!
//! Defines the three record kinds (isolator types, paired data entries,
//! audit log entries), the request shapes the HTTP API accepts, and the
//! lenient coercion rules applied to form input.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod coerce;
pub mod error;
pub mod preview;
pub mod record;
pub mod request;

pub use coerce::{coerce_float, format_range, parse_range, FreqRange, Scalar};
pub use error::CoreError;
pub use preview::{preview, PreviewCurve};
pub use record::{
    DataItem, DataPatch, LogItem, NewData, NewType, RecordId, TypeItem, TypePatch,
};
pub use request::{
    AppendLogBody, BulkDeleteBody, CreateDataBody, CreateTypeBody, UpdateDataBody,
    UpdateTypeBody,
};
