//! Trait definitions with mockall annotations for testing
//!
//! Every outbound HTTP dependency of the pipeline sits behind one of these
//! traits so resolution and orchestration can be exercised without a network.

use async_trait::async_trait;
use shared::{Platform, SourceKind};

use crate::error::{LookupFailure, PipelineResult};
use crate::types::RawPayload;

/// External pronoun lookup service
#[mockall::automock]
#[async_trait]
pub trait LookupService: Send + Sync {
    /// Service name used in logs
    fn name(&self) -> &'static str;

    /// Platform whose handle this service is queried with
    fn platform(&self) -> Platform;

    /// Look up a handle
    ///
    /// # Returns
    /// `Ok(None)` when the service has no data for the handle, or the
    /// pronoun string mapped into the text the classifier understands.
    async fn lookup(&self, handle: &str) -> Result<Option<String>, LookupFailure>;
}

/// Event platform adapter producing raw source documents
#[mockall::automock]
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Platform this adapter speaks to
    fn kind(&self) -> SourceKind;

    /// Fetch every document needed to normalize the event at `locator`
    async fn fetch(&self, locator: &str) -> PipelineResult<RawPayload>;
}
