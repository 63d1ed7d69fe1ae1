//! Trait definitions with mockall annotations for testing

use async_trait::async_trait;
use pipeline::PipelineResult;
use shared::{AggregationResult, SourceKind};

/// Produces the aggregation result for one event
#[mockall::automock]
#[async_trait]
pub trait EventCalculator: Send + Sync {
    async fn calculate(&self, kind: SourceKind, locator: &str) -> PipelineResult<AggregationResult>;
}
