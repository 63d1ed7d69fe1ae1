//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use crate::errors::SharedError;

static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Process identifier for any binary in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    /// HTTP API process
    WebServer,
    /// Batch survey process
    Survey,
}

impl ProcessId {
    /// Initialize the global process ID for the webserver
    pub fn init_webserver() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::WebServer)
    }

    /// Initialize the global process ID for the survey batch
    pub fn init_survey() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Survey)
    }

    /// Get the global process ID, defaulting to the webserver when uninitialized
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get().unwrap_or(&ProcessId::WebServer)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::WebServer => write!(f, "webserver"),
            ProcessId::Survey => write!(f, "survey"),
        }
    }
}

/// Event platforms the pipeline can ingest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Oengus,
    Horaro,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Oengus => write!(f, "oengus"),
            SourceKind::Horaro => write!(f, "horaro"),
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "oengus" => Ok(SourceKind::Oengus),
            "horaro" => Ok(SourceKind::Horaro),
            _ => Err(SharedError::InvalidSourceKind {
                input: s.to_string(),
            }),
        }
    }
}

/// External platforms a runner may hold a handle on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    SpeedrunCom,
    Twitch,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::SpeedrunCom => write!(f, "speedruncom"),
            Platform::Twitch => write!(f, "twitch"),
        }
    }
}

/// A participant as it appears in a canonical event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runner {
    pub identifier: String,
    pub declared_pronoun: Option<String>,
    #[serde(default)]
    pub external_handles: BTreeMap<Platform, String>,
}

impl Runner {
    /// Runner with no declared pronoun and no external handles
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            declared_pronoun: None,
            external_handles: BTreeMap::new(),
        }
    }

    pub fn with_pronoun(mut self, pronoun: impl Into<String>) -> Self {
        self.declared_pronoun = Some(pronoun.into());
        self
    }

    pub fn with_handle(mut self, platform: Platform, handle: impl Into<String>) -> Self {
        self.external_handles.insert(platform, handle.into());
        self
    }

    /// Declared pronoun, ignoring blank values
    pub fn declared(&self) -> Option<&str> {
        self.declared_pronoun
            .as_deref()
            .filter(|pronoun| !pronoun.trim().is_empty())
    }

    /// Handle to query `platform` with, falling back to the bare identifier
    pub fn handle_for(&self, platform: Platform) -> &str {
        self.external_handles
            .get(&platform)
            .map(String::as_str)
            .unwrap_or(&self.identifier)
    }
}

/// Source-agnostic roster and optional schedule of one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub source: SourceKind,
    pub name: String,
    pub runners: Vec<Runner>,
    /// Runner identifiers in schedule order; may reference unknown runners
    pub scheduled: Option<Vec<String>>,
}

/// Fixed pronoun taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "he/him")]
    HeHim,
    #[serde(rename = "she/her")]
    SheHer,
    #[serde(rename = "other")]
    Other,
    #[serde(rename = "none")]
    None,
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "notFound")]
    NotFound,
}

impl Category {
    /// Buckets reported for submissions
    pub const SUBMISSIONS: [Category; 5] = [
        Category::HeHim,
        Category::SheHer,
        Category::Other,
        Category::None,
        Category::Error,
    ];

    /// Buckets reported for a schedule
    pub const SCHEDULE: [Category; 6] = [
        Category::HeHim,
        Category::SheHer,
        Category::Other,
        Category::None,
        Category::Error,
        Category::NotFound,
    ];

    /// Buckets left out of the normalized denominator, for every view
    pub const NORMALIZED_EXCLUDED: [Category; 2] = [Category::None, Category::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::HeHim => "he/him",
            Category::SheHer => "she/her",
            Category::Other => "other",
            Category::None => "none",
            Category::Error => "error",
            Category::NotFound => "notFound",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Share of a total; `None` when the denominator is zero
pub type Share = Option<f64>;

pub type CategoryCounts = BTreeMap<Category, u64>;

/// Counts and percentages over one roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateView {
    pub counts: CategoryCounts,
    pub percentages: BTreeMap<Category, Share>,
    pub normalized_percentages: BTreeMap<Category, Share>,
}

impl AggregateView {
    pub fn count(&self, category: Category) -> u64 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn percentage(&self, category: Category) -> Share {
        self.percentages.get(&category).copied().flatten()
    }

    pub fn normalized_percentage(&self, category: Category) -> Share {
        self.normalized_percentages.get(&category).copied().flatten()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Response body for one calculated event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub name: String,
    pub submissions: AggregateView,
    pub schedule: Option<AggregateView>,
}

/// Response body for a failed calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
