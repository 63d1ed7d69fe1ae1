//! Shared types for the marathon pronoun survey
//!
//! Contains the canonical event model and aggregate views exchanged between
//! the pipeline, the HTTP API and the survey batch.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
