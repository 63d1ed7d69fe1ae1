//! Common test utilities and infrastructure
//!
//! Fixtures and builders shared by the pipeline integration suites.

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::TestFixtures;
pub use helpers::{DelayedLookup, PipelineBuilder, failing_lookup, silent_lookup, table_lookup};
