use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_delay_arg, parse_duration_arg, parse_positive_usize};
use super::types::{PositiveUsize, ScenarioKind};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Probe an API behind rate limiting and artificial throttling: health check, latency, 429 counts, POST and database round trips."
)]
pub struct ProbeArgs {
    /// Base URL of the API under test (defaults to http://localhost:8888)
    #[arg(long = "base-url", short = 'u', env = "PROBE_BASE_URL")]
    pub base_url: Option<String>,

    /// Timeout applied to every scenario request (supports ms/s/m/h)
    #[arg(long = "timeout", value_parser = parse_duration_arg)]
    pub request_timeout: Option<Duration>,

    /// Timeout for the initial health check (supports ms/s/m/h)
    #[arg(long = "health-timeout", value_parser = parse_duration_arg)]
    pub health_timeout: Option<Duration>,

    /// Pause between scenarios (supports ms/s/m/h, 0 disables)
    #[arg(long = "pause", value_parser = parse_delay_arg)]
    pub pause: Option<Duration>,

    /// Number of sequential requests in the throttling scenario
    #[arg(long = "throttling-requests")]
    pub throttling_requests: Option<usize>,

    /// Number of sequential requests in the rate limiting scenario
    #[arg(long = "rate-limit-requests")]
    pub rate_limit_requests: Option<usize>,

    /// Number of requests in the concurrent scenario
    #[arg(long = "concurrent-requests")]
    pub concurrent_requests: Option<usize>,

    /// Worker pool size for the concurrent scenario (defaults to the request count)
    #[arg(long = "max-parallel", value_parser = parse_positive_usize)]
    pub max_parallel: Option<PositiveUsize>,

    /// Run only these scenarios, in the given order (repeatable)
    #[arg(long = "scenario", short = 's', value_enum)]
    pub scenarios: Vec<ScenarioKind>,

    /// Path to config file (TOML or JSON)
    #[arg(long, short)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,
}
