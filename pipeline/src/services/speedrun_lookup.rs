//! speedrun.com user lookup (first resolution service)

use async_trait::async_trait;
use serde::Deserialize;

use shared::Platform;

use crate::error::LookupFailure;
use crate::services::http::endpoint_url;
use crate::traits::LookupService;

#[derive(Debug, Deserialize)]
struct UserResponse {
    #[serde(default)]
    data: Option<UserData>,
}

#[derive(Debug, Deserialize)]
struct UserData {
    #[serde(default)]
    pronouns: Option<String>,
}

/// Queries `{base}/users/{handle}` and reads `data.pronouns`
#[derive(Debug, Clone)]
pub struct RealSpeedrunLookup {
    client: reqwest::Client,
    base_url: String,
}

impl RealSpeedrunLookup {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl LookupService for RealSpeedrunLookup {
    fn name(&self) -> &'static str {
        "speedrun.com"
    }

    fn platform(&self) -> Platform {
        Platform::SpeedrunCom
    }

    async fn lookup(&self, handle: &str) -> Result<Option<String>, LookupFailure> {
        let url = endpoint_url(&self.base_url, &["users", handle]).map_err(LookupFailure::Transport)?;

        tracing::debug!(handle = %handle, url = %url, "Querying speedrun.com");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            tracing::warn!(handle = %handle, status = %status, "speedrun.com returned no data");
            return Ok(None);
        }

        let body: UserResponse = response.json().await?;

        Ok(body
            .data
            .and_then(|user| user.pronouns)
            .map(|pronouns| pronouns.trim().to_lowercase())
            .filter(|pronouns| !pronouns.is_empty()))
    }
}
