//! WebServer entry point
//!
//! Serves pronoun aggregates for Oengus marathons and Horaro schedules.

use clap::Parser;
use shared::{ProcessId, logging, process_info};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use pipeline::{Endpoints, Pipeline, PipelineConfig, config};
use webserver::{RealEventCalculator, WebServer, WebServerError, WebServerResult};

/// Command line arguments, each with an environment fallback
#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "HTTP API computing pronoun distributions for speedrun marathons")]
struct Args {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port for the HTTP server
    #[arg(long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Lifetime of cached pronoun lookups, in seconds
    #[arg(long, env = "CACHE_TTL_SECS", default_value = "3600")]
    cache_ttl_secs: u64,

    /// Timeout for every outbound request, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "10")]
    request_timeout_secs: u64,

    /// Runners resolved concurrently per event
    #[arg(long, env = "MAX_CONCURRENT_LOOKUPS", default_value = "16")]
    max_concurrent_lookups: usize,

    #[arg(long, env = "OENGUS_API_URL", default_value = config::DEFAULT_OENGUS_API)]
    oengus_api: String,

    #[arg(long, env = "HORARO_URL", default_value = config::DEFAULT_HORARO)]
    horaro: String,

    #[arg(long, env = "SPEEDRUN_API_URL", default_value = config::DEFAULT_SPEEDRUN_API)]
    speedrun_api: String,

    #[arg(long, env = "PRONOUNS_API_URL", default_value = config::DEFAULT_PRONOUNS_API)]
    pronouns_api: String,
}

impl Args {
    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            endpoints: Endpoints {
                oengus_api: self.oengus_api.clone(),
                horaro: self.horaro.clone(),
                speedrun_api: self.speedrun_api.clone(),
                pronouns_api: self.pronouns_api.clone(),
            },
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_concurrent_lookups: self.max_concurrent_lookups,
        }
    }
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    ProcessId::init_webserver();
    logging::init_tracing_with_level(Some(&args.log_level));

    let bind_address: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| WebServerError::config(format!("Invalid bind address: {e}")))?;

    let config = args.pipeline_config();
    let pipeline = Pipeline::from_config(&config)?;

    logging::log_startup(ProcessId::current(), &format!("WebServer on {bind_address}"));
    process_info!(
        ProcessId::current(),
        "cache TTL {}s, request timeout {}s, {} concurrent lookups",
        config.cache_ttl.as_secs(),
        config.request_timeout.as_secs(),
        config.max_concurrent_lookups
    );

    let calculator = RealEventCalculator::new(Arc::new(pipeline));
    let webserver = WebServer::new(bind_address, calculator);

    webserver.run().await?;

    logging::log_success(ProcessId::current(), "WebServer stopped gracefully");
    Ok(())
}
