//! Oengus marathon adapter

use async_trait::async_trait;
use serde_json::Value;

use shared::SourceKind;

use crate::error::{PipelineError, PipelineResult};
use crate::services::http::endpoint_url;
use crate::traits::EventSource;
use crate::types::{MarathonSummary, MarathonWindow, RawPayload};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Fetches marathon, submissions and schedule documents for a slug
#[derive(Debug, Clone)]
pub struct RealOengusSource {
    client: reqwest::Client,
    base_url: String,
}

impl RealOengusSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn get(&self, segments: &[&str]) -> PipelineResult<reqwest::Response> {
        let url = endpoint_url(&self.base_url, segments).map_err(PipelineError::upstream)?;
        tracing::debug!(url = %url, "Querying Oengus");
        Ok(self.client.get(url).send().await?)
    }

    async fn read_json(response: reqwest::Response, document: &str) -> PipelineResult<Value> {
        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::upstream(format!(
                "Oengus {document} request returned {status}"
            )));
        }

        response.json().await.map_err(|e| {
            PipelineError::malformed(SourceKind::Oengus, format!("{document} is not JSON: {e}"))
        })
    }

    /// Marathons overlapping `window`
    pub async fn list_marathons(&self, window: &MarathonWindow) -> PipelineResult<Vec<MarathonSummary>> {
        let mut url = endpoint_url(&self.base_url, &["marathons", "forDates"])
            .map_err(PipelineError::upstream)?;
        url.query_pairs_mut()
            .append_pair("start", &window.start.format(TIMESTAMP_FORMAT).to_string())
            .append_pair("end", &window.end.format(TIMESTAMP_FORMAT).to_string())
            .append_pair("zoneId", &window.zone_id);

        tracing::debug!(url = %url, "Listing Oengus marathons");

        let response = self.client.get(url).send().await?;
        let listing = Self::read_json(response, "marathon listing").await?;

        serde_json::from_value(listing).map_err(|e| {
            PipelineError::malformed(SourceKind::Oengus, format!("unexpected marathon listing: {e}"))
        })
    }
}

#[async_trait]
impl EventSource for RealOengusSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Oengus
    }

    async fn fetch(&self, locator: &str) -> PipelineResult<RawPayload> {
        let slug = locator.trim();
        if slug.is_empty() || slug.contains('/') {
            return Err(PipelineError::InvalidLocator {
                locator: locator.to_string(),
                reason: "expected a single marathon slug".to_string(),
            });
        }

        let marathon = self.get(&["marathons", slug]).await?;
        if marathon.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(RawPayload::Missing);
        }
        let marathon = Self::read_json(marathon, "marathon").await?;

        let submissions = self.get(&["marathons", slug, "submissions"]).await?;
        let submissions = Self::read_json(submissions, "submissions").await?;

        let schedule = match self.get(&["marathons", slug, "schedule"]).await {
            Ok(response) if response.status().is_success() => match response.json::<Value>().await {
                Ok(schedule) => Some(schedule),
                Err(e) => {
                    tracing::warn!(slug = %slug, error = %e, "Schedule is not JSON");
                    None
                }
            },
            Ok(response) => {
                tracing::debug!(slug = %slug, status = %response.status(), "No schedule published");
                None
            }
            Err(e) => {
                tracing::warn!(slug = %slug, error = %e, "Schedule request failed");
                None
            }
        };

        Ok(RawPayload::Oengus {
            marathon,
            submissions,
            schedule,
        })
    }
}
