//! Webserver library for the pronoun survey service
//!
//! Exposes the aggregation pipeline over a small JSON HTTP API.

pub mod error;
pub mod services;
pub mod state;
pub mod traits;
pub mod types;
pub mod webserver_impl;

// Re-export main types
pub use error::{WebServerError, WebServerResult};
pub use state::WebServerState;
pub use types::*;
pub use webserver_impl::WebServer;

// Re-export trait definitions
pub use traits::{EventCalculator, MockEventCalculator};

// Re-export service implementations
pub use services::RealEventCalculator;
