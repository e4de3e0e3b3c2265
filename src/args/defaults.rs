use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str =
    concat!("throttle-probe/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:8888";

/// Default config filenames checked when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["probe.toml", "probe.json"];

pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub(crate) const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
/// Gap between consecutive scenarios.
pub(crate) const DEFAULT_PAUSE: Duration = Duration::from_secs(1);

pub(crate) const DEFAULT_THROTTLING_REQUESTS: usize = 5;
pub(crate) const DEFAULT_RATE_LIMIT_REQUESTS: usize = 20;
pub(crate) const DEFAULT_CONCURRENT_REQUESTS: usize = 10;

/// Largest request count accepted for a single scenario.
pub const MAX_SCENARIO_REQUESTS: usize = 100_000;
/// Largest worker pool the concurrent scenario will spawn.
pub const MAX_PARALLEL: usize = 1_024;
