//! Compliance document tracking for building portfolios.
//!
//! The `compliance` module carries the gap-analysis core: a pure
//! classification engine that decides, per document type, whether a
//! building's documentation is missing, stale, or ambiguous. The `documents`
//! module wires that core to a pluggable store and exposes the HTTP surface
//! consumed by the api service.

pub mod compliance;
pub mod config;
pub mod documents;
pub mod error;
pub mod telemetry;
