//! Service tests for the pipeline
//!
//! HTTP adapters and lookup clients exercised against wiremock servers.

pub mod horaro_source;
