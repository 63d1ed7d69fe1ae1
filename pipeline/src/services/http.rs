//! HTTP plumbing shared by every adapter

use std::time::Duration;
use url::Url;

use crate::error::{PipelineError, PipelineResult};

const USER_AGENT: &str = concat!("pronoun-survey/", env!("CARGO_PKG_VERSION"));

/// Client used for every outbound call, with a per-request timeout
pub fn build_client(timeout: Duration) -> PipelineResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| PipelineError::Config {
            message: format!("Failed to create HTTP client: {e}"),
        })
}

/// Append percent-encoded path `segments` to `base`
pub fn endpoint_url(base: &str, segments: &[&str]) -> Result<Url, String> {
    let mut url = Url::parse(base).map_err(|e| format!("invalid base URL {base}: {e}"))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| format!("base URL {base} cannot carry a path"))?;
        path.pop_if_empty().extend(segments);
    }
    Ok(url)
}
