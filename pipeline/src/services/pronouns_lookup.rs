//! Twitch pronouns lookup (second resolution service)

use async_trait::async_trait;
use serde::Deserialize;

use shared::Platform;

use crate::error::LookupFailure;
use crate::services::http::endpoint_url;
use crate::traits::LookupService;

#[derive(Debug, Deserialize)]
struct PronounEntry {
    #[serde(default)]
    pronoun_id: Option<String>,
}

/// Pronoun text for a service code
pub fn pronoun_for_code(code: &str) -> &'static str {
    match code {
        "hehim" => "he/him",
        "sheher" => "she/her",
        _ => "other",
    }
}

/// Queries `{base}/users/{handle}` and maps the first entry's code
#[derive(Debug, Clone)]
pub struct RealPronounsLookup {
    client: reqwest::Client,
    base_url: String,
}

impl RealPronounsLookup {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl LookupService for RealPronounsLookup {
    fn name(&self) -> &'static str {
        "pronouns.alejo.io"
    }

    fn platform(&self) -> Platform {
        Platform::Twitch
    }

    async fn lookup(&self, handle: &str) -> Result<Option<String>, LookupFailure> {
        let url = endpoint_url(&self.base_url, &["users", handle]).map_err(LookupFailure::Transport)?;

        tracing::debug!(handle = %handle, url = %url, "Querying pronouns API");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            tracing::warn!(handle = %handle, status = %status, "pronouns API returned no data");
            return Ok(None);
        }

        let entries: Vec<PronounEntry> = response.json().await?;

        Ok(entries
            .into_iter()
            .next()
            .and_then(|entry| entry.pronoun_id)
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty())
            .map(|code| pronoun_for_code(&code).to_string()))
    }
}
