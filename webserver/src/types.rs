//! Request and response types for the HTTP API

use serde::{Deserialize, Serialize};

/// Query string of the legacy `/calculate?slug=` route
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculateQuery {
    #[serde(default)]
    pub slug: Option<String>,
}

impl CalculateQuery {
    /// Non-blank slug, if any
    pub fn slug(&self) -> Option<&str> {
        self.slug
            .as_deref()
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub requests_served: u64,
    pub version: String,
}
