//! Builders and lookup doubles for pipeline tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use pipeline::{
    EventSource, LookupFailure, LookupService, MockEventSource, MockLookupService, Pipeline,
    RawPayload, ResolutionCache, Resolver,
};
use shared::{Platform, SourceKind};

use super::fixtures::TestFixtures;

/// Lookup answering from a fixed handle table
pub fn table_lookup(
    name: &'static str,
    platform: Platform,
    table: &[(&str, &str)],
) -> MockLookupService {
    let table: HashMap<String, String> = table
        .iter()
        .map(|(handle, pronoun)| (handle.to_string(), pronoun.to_string()))
        .collect();

    let mut lookup = MockLookupService::new();
    lookup.expect_name().return_const(name);
    lookup.expect_platform().return_const(platform);
    lookup
        .expect_lookup()
        .returning(move |handle| Ok(table.get(handle).cloned()));
    lookup
}

/// Lookup that never has data
pub fn silent_lookup(name: &'static str, platform: Platform) -> MockLookupService {
    table_lookup(name, platform, &[])
}

/// Lookup failing for every handle
pub fn failing_lookup(name: &'static str, platform: Platform) -> MockLookupService {
    let mut lookup = MockLookupService::new();
    lookup.expect_name().return_const(name);
    lookup.expect_platform().return_const(platform);
    lookup
        .expect_lookup()
        .returning(|_| Err(LookupFailure::Transport("connection refused".to_string())));
    lookup
}

/// Lookup that answers `he/him` after a per-handle delay and records peak concurrency
pub struct DelayedLookup {
    delays: HashMap<String, Duration>,
    in_flight: AtomicUsize,
    pub peak: AtomicUsize,
}

impl DelayedLookup {
    pub fn new(delays: &[(&str, u64)]) -> Self {
        Self {
            delays: delays
                .iter()
                .map(|(handle, millis)| (handle.to_string(), Duration::from_millis(*millis)))
                .collect(),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LookupService for DelayedLookup {
    fn name(&self) -> &'static str {
        "delayed"
    }

    fn platform(&self) -> Platform {
        Platform::SpeedrunCom
    }

    async fn lookup(&self, handle: &str) -> Result<Option<String>, LookupFailure> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);

        let delay = self.delays.get(handle).copied().unwrap_or_default();
        tokio::time::sleep(delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(Some("he/him".to_string()))
    }
}

/// Builder for pipelines wired with test doubles
pub struct PipelineBuilder {
    lookups: Vec<Arc<dyn LookupService>>,
    sources: Vec<Arc<dyn EventSource>>,
    cache: Arc<ResolutionCache>,
    max_concurrent: usize,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            lookups: Vec::new(),
            sources: Vec::new(),
            cache: Arc::new(ResolutionCache::new(Duration::from_secs(
                TestFixtures::CACHE_TTL_SECS,
            ))),
            max_concurrent: TestFixtures::MAX_CONCURRENT,
        }
    }

    pub fn with_lookup(mut self, lookup: impl LookupService + 'static) -> Self {
        self.lookups.push(Arc::new(lookup));
        self
    }

    pub fn with_shared_lookup(mut self, lookup: Arc<dyn LookupService>) -> Self {
        self.lookups.push(lookup);
        self
    }

    pub fn with_source(mut self, source: impl EventSource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// Source returning `payload` for every locator
    pub fn with_payload(self, kind: SourceKind, payload: RawPayload) -> Self {
        let mut source = MockEventSource::new();
        source.expect_kind().return_const(kind);
        source
            .expect_fetch()
            .returning(move |_| Ok(payload.clone()));
        self.with_source(source)
    }

    pub fn with_cache(mut self, cache: Arc<ResolutionCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    pub fn build(self) -> Pipeline {
        let resolver = Resolver::new(self.cache, self.lookups);
        Pipeline::new(resolver, self.sources, self.max_concurrent)
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
