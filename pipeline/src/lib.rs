//! Pronoun survey pipeline
//!
//! Normalizes event rosters from Oengus and Horaro, resolves missing pronouns
//! through external lookup services with a shared TTL cache, classifies every
//! runner into a fixed taxonomy and aggregates submissions and schedule views.

pub mod config;
pub mod core;
pub mod error;
pub mod pipeline_impl;
pub mod resolver;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use config::{Endpoints, PipelineConfig};
pub use core::ResolutionCache;
pub use error::{LookupFailure, PipelineError, PipelineResult};
pub use pipeline_impl::Pipeline;
pub use resolver::Resolver;
pub use types::*;

// Re-export trait definitions
pub use traits::{EventSource, LookupService, MockEventSource, MockLookupService};
