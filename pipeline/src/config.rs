//! Pipeline configuration

use std::time::Duration;
use url::Url;

use crate::error::{PipelineError, PipelineResult};

pub const DEFAULT_OENGUS_API: &str = "https://oengus.io/api";
pub const DEFAULT_HORARO: &str = "https://horaro.org";
pub const DEFAULT_SPEEDRUN_API: &str = "https://www.speedrun.com/api/v1";
pub const DEFAULT_PRONOUNS_API: &str = "https://pronouns.alejo.io/api";

/// Base URLs of every upstream the pipeline talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub oengus_api: String,
    pub horaro: String,
    pub speedrun_api: String,
    pub pronouns_api: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            oengus_api: DEFAULT_OENGUS_API.to_string(),
            horaro: DEFAULT_HORARO.to_string(),
            speedrun_api: DEFAULT_SPEEDRUN_API.to_string(),
            pronouns_api: DEFAULT_PRONOUNS_API.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub endpoints: Endpoints,
    /// Lifetime of a resolution cache entry
    pub cache_ttl: Duration,
    /// Per-request timeout applied to every outbound call
    pub request_timeout: Duration,
    /// Runners resolved at once within one event
    pub max_concurrent_lookups: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            cache_ttl: Duration::from_secs(3600),
            request_timeout: Duration::from_secs(10),
            max_concurrent_lookups: 16,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> PipelineResult<()> {
        for (field, value) in [
            ("oengus_api", &self.endpoints.oengus_api),
            ("horaro", &self.endpoints.horaro),
            ("speedrun_api", &self.endpoints.speedrun_api),
            ("pronouns_api", &self.endpoints.pronouns_api),
        ] {
            Url::parse(value).map_err(|e| PipelineError::Config {
                message: format!("{field} is not a valid URL ({value}): {e}"),
            })?;
        }

        if self.max_concurrent_lookups == 0 {
            return Err(PipelineError::Config {
                message: "max_concurrent_lookups must be at least 1".to_string(),
            });
        }

        if self.request_timeout.is_zero() {
            return Err(PipelineError::Config {
                message: "request_timeout must be non-zero".to_string(),
            });
        }

        Ok(())
    }
}
