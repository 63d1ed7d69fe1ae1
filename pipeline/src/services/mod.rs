//! Service implementations
//!
//! Real implementations of all service traits for production use

pub mod horaro_source;
pub mod http;
pub mod oengus_source;
pub mod pronouns_lookup;
pub mod speedrun_lookup;

#[cfg(test)]
mod tests;

// Re-export service implementations
pub use horaro_source::RealHoraroSource;
pub use oengus_source::RealOengusSource;
pub use pronouns_lookup::RealPronounsLookup;
pub use speedrun_lookup::RealSpeedrunLookup;
