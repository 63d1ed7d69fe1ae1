//! Core business logic modules
//!
//! Pure business logic with no I/O dependencies

pub mod aggregator;
pub mod cache;
pub mod classifier;
pub mod normalizer;

// Re-export commonly used items
pub use aggregator::{aggregate, aggregate_schedule, combine_counts, view_from_counts};
pub use cache::ResolutionCache;
pub use classifier::{classify, classify_pronoun, classify_runner};
pub use normalizer::normalize;
