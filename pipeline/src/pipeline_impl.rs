//! Main pipeline implementation
//!
//! Sequences fetch → normalize → resolve → classify → aggregate for one event.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use futures_util::stream::{self, StreamExt};
use tracing::info;

use shared::{AggregationResult, Category, NormalizedEvent, Runner, SourceKind};

use crate::config::PipelineConfig;
use crate::core::{ResolutionCache, aggregate, aggregate_schedule, classify_runner, normalize};
use crate::error::{PipelineError, PipelineResult};
use crate::resolver::Resolver;
use crate::services::{
    RealHoraroSource, RealOengusSource, RealPronounsLookup, RealSpeedrunLookup, http,
};
use crate::traits::{EventSource, LookupService};
use crate::types::{ClassifiedRunner, ResolvedRunner};

pub struct Pipeline {
    resolver: Resolver,
    sources: HashMap<SourceKind, Arc<dyn EventSource>>,
    max_concurrent_lookups: usize,
}

impl Pipeline {
    /// Create a pipeline with dependency injection
    pub fn new(
        resolver: Resolver,
        sources: Vec<Arc<dyn EventSource>>,
        max_concurrent_lookups: usize,
    ) -> Self {
        let sources = sources
            .into_iter()
            .map(|source| (source.kind(), source))
            .collect();

        Self {
            resolver,
            sources,
            max_concurrent_lookups: max_concurrent_lookups.max(1),
        }
    }

    /// Wire the real adapters and lookup services from configuration
    pub fn from_config(config: &PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;

        let client = http::build_client(config.request_timeout)?;
        let endpoints = &config.endpoints;

        let lookups: Vec<Arc<dyn LookupService>> = vec![
            Arc::new(RealSpeedrunLookup::new(client.clone(), &endpoints.speedrun_api)),
            Arc::new(RealPronounsLookup::new(client.clone(), &endpoints.pronouns_api)),
        ];
        let sources: Vec<Arc<dyn EventSource>> = vec![
            Arc::new(RealOengusSource::new(client.clone(), &endpoints.oengus_api)),
            Arc::new(RealHoraroSource::new(client, &endpoints.horaro)),
        ];

        let cache = Arc::new(ResolutionCache::new(config.cache_ttl));
        let resolver = Resolver::new(cache, lookups);

        Ok(Self::new(resolver, sources, config.max_concurrent_lookups))
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Fetch, normalize and aggregate the event at `locator`
    pub async fn calculate(&self, kind: SourceKind, locator: &str) -> PipelineResult<AggregationResult> {
        let source = self
            .sources
            .get(&kind)
            .ok_or_else(|| PipelineError::UnsupportedSource {
                name: kind.to_string(),
            })?;

        let payload = source.fetch(locator).await?;
        let event = normalize(payload, kind)?;

        Ok(self.run(event).await)
    }

    /// Resolve runners concurrently, keeping their input order
    pub async fn resolve_all(&self, runners: Vec<Runner>) -> Vec<ResolvedRunner> {
        // `buffered` yields in input order whatever the completion order
        stream::iter(runners)
            .map(|runner| self.resolver.resolve(runner))
            .buffered(self.max_concurrent_lookups)
            .collect()
            .await
    }

    /// Aggregate an already-normalized event
    pub async fn run(&self, event: NormalizedEvent) -> AggregationResult {
        let started = Instant::now();
        let NormalizedEvent {
            source,
            name,
            runners,
            scheduled,
        } = event;
        let runner_count = runners.len();

        let resolved = self.resolve_all(runners).await;
        let classified: Vec<ClassifiedRunner> = resolved.iter().map(classify_runner).collect();
        let submissions = aggregate(&classified);

        let schedule = scheduled.map(|scheduled| {
            let by_identifier: HashMap<&str, Category> = classified
                .iter()
                .map(|entry| (entry.identifier.as_str(), entry.category))
                .collect();
            aggregate_schedule(&scheduled, &by_identifier)
        });

        info!(
            source = %source,
            event = %name,
            runners = runner_count,
            errors = submissions.count(Category::Error),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Calculated pronoun aggregates"
        );

        AggregationResult {
            name,
            submissions,
            schedule,
        }
    }
}
