//! Pipeline-backed calculator

use async_trait::async_trait;
use std::sync::Arc;

use pipeline::{Pipeline, PipelineResult};
use shared::{AggregationResult, SourceKind};

use crate::traits::EventCalculator;

/// Runs every request through one shared pipeline and its resolution cache
#[derive(Clone)]
pub struct RealEventCalculator {
    pipeline: Arc<Pipeline>,
}

impl RealEventCalculator {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl EventCalculator for RealEventCalculator {
    async fn calculate(&self, kind: SourceKind, locator: &str) -> PipelineResult<AggregationResult> {
        self.pipeline.calculate(kind, locator).await
    }
}
