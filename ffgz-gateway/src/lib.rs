//! HTTP API gateway for the FFGZ record service.
//!
//! Exposes isolator type records, paired data records, the audit log and a
//! placeholder response preview under `/api`.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
