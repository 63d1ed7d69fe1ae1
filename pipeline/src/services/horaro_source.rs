//! Horaro schedule adapter

use async_trait::async_trait;

use shared::SourceKind;

use crate::error::{PipelineError, PipelineResult};
use crate::services::http::endpoint_url;
use crate::traits::EventSource;
use crate::types::RawPayload;

/// Fetches `{base}/{organization}/{event}.json`
#[derive(Debug, Clone)]
pub struct RealHoraroSource {
    client: reqwest::Client,
    base_url: String,
}

impl RealHoraroSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

/// Split an `organization/event` locator
pub fn split_locator(locator: &str) -> PipelineResult<(&str, &str)> {
    let parts: Vec<&str> = locator.trim().trim_matches('/').split('/').collect();

    match parts.as_slice() {
        [organization, event] if !organization.is_empty() && !event.is_empty() => {
            Ok((*organization, *event))
        }
        _ => Err(PipelineError::InvalidLocator {
            locator: locator.to_string(),
            reason: "expected organization/event".to_string(),
        }),
    }
}

#[async_trait]
impl EventSource for RealHoraroSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Horaro
    }

    async fn fetch(&self, locator: &str) -> PipelineResult<RawPayload> {
        let (organization, event) = split_locator(locator)?;
        let document = format!("{event}.json");
        let url = endpoint_url(&self.base_url, &[organization, &document])
            .map_err(PipelineError::upstream)?;

        tracing::debug!(url = %url, "Querying Horaro");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(RawPayload::Missing);
        }
        if !status.is_success() {
            return Err(PipelineError::upstream(format!("Horaro request returned {status}")));
        }

        let schedule = response.json().await.map_err(|e| {
            PipelineError::malformed(SourceKind::Horaro, format!("schedule is not JSON: {e}"))
        })?;

        Ok(RawPayload::Horaro { schedule })
    }
}
