//! Pipeline-internal data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{Category, Runner, SourceKind};

/// Outcome of pronoun resolution for one runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Declared, cached or looked-up pronoun text
    Pronoun(String),
    /// An external lookup failed for this runner
    Error,
    /// No source had any data
    Unresolved,
}

/// Runner paired with its resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRunner {
    pub runner: Runner,
    pub resolution: Resolution,
}

impl ResolvedRunner {
    pub fn new(runner: Runner, resolution: Resolution) -> Self {
        Self { runner, resolution }
    }

    pub fn identifier(&self) -> &str {
        &self.runner.identifier
    }
}

/// Final per-runner stage consumed by aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRunner {
    pub identifier: String,
    pub category: Category,
}

/// Source documents as handed over by an adapter, before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    /// The platform reported that the event does not exist
    Missing,
    Oengus {
        marathon: Value,
        submissions: Value,
        /// `None` when the schedule document could not be fetched
        schedule: Option<Value>,
    },
    Horaro {
        schedule: Value,
    },
}

impl RawPayload {
    pub fn kind(&self) -> Option<SourceKind> {
        match self {
            RawPayload::Missing => None,
            RawPayload::Oengus { .. } => Some(SourceKind::Oengus),
            RawPayload::Horaro { .. } => Some(SourceKind::Horaro),
        }
    }
}

/// Marathon entry from the Oengus date-range listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarathonSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Window of marathons to list for a survey
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarathonWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub zone_id: String,
}
