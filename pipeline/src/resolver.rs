//! Pronoun resolution
//!
//! A runner's declared pronoun wins. Otherwise the shared cache is consulted,
//! then each lookup service in order. The first service with data settles
//! the runner and its answer is cached. A failing service marks that runner
//! as [`Resolution::Error`] and stops the cascade for it.

use std::sync::Arc;
use tracing::{debug, warn};

use shared::Runner;

use crate::core::ResolutionCache;
use crate::error::LookupFailure;
use crate::traits::LookupService;
use crate::types::{Resolution, ResolvedRunner};

pub struct Resolver {
    cache: Arc<ResolutionCache>,
    lookups: Vec<Arc<dyn LookupService>>,
}

impl Resolver {
    /// Create a resolver trying `lookups` in the given order
    pub fn new(cache: Arc<ResolutionCache>, lookups: Vec<Arc<dyn LookupService>>) -> Self {
        Self { cache, lookups }
    }

    pub fn cache(&self) -> &Arc<ResolutionCache> {
        &self.cache
    }

    pub async fn resolve(&self, runner: Runner) -> ResolvedRunner {
        if let Some(declared) = runner.declared() {
            let pronoun = declared.to_string();
            return ResolvedRunner::new(runner, Resolution::Pronoun(pronoun));
        }

        if let Some(cached) = self.cache.get(&runner.identifier).await {
            debug!(runner = %runner.identifier, pronoun = %cached, "resolution cache hit");
            return ResolvedRunner::new(runner, Resolution::Pronoun(cached));
        }

        let resolution = match self.lookup_external(&runner).await {
            Ok(Some(pronoun)) => {
                self.cache
                    .insert(runner.identifier.clone(), pronoun.clone())
                    .await;
                Resolution::Pronoun(pronoun)
            }
            Ok(None) => Resolution::Unresolved,
            Err(_) => Resolution::Error,
        };

        ResolvedRunner::new(runner, resolution)
    }

    async fn lookup_external(&self, runner: &Runner) -> Result<Option<String>, LookupFailure> {
        for service in &self.lookups {
            let handle = runner.handle_for(service.platform());

            match service.lookup(handle).await {
                Ok(Some(pronoun)) => {
                    debug!(
                        runner = %runner.identifier,
                        service = service.name(),
                        pronoun = %pronoun,
                        "resolved pronoun"
                    );
                    return Ok(Some(pronoun));
                }
                Ok(None) => continue,
                Err(failure) => {
                    warn!(
                        runner = %runner.identifier,
                        service = service.name(),
                        error = %failure,
                        "pronoun lookup failed"
                    );
                    return Err(failure);
                }
            }
        }

        Ok(None)
    }
}
