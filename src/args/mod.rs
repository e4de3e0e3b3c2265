//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
mod parsers;
mod types;


pub use cli::ProbeArgs;
pub use defaults::{MAX_PARALLEL, MAX_SCENARIO_REQUESTS};
pub use types::{HttpMethod, PositiveUsize, ScenarioKind};

pub(crate) use defaults::{
    DEFAULT_BASE_URL, DEFAULT_CONCURRENT_REQUESTS, DEFAULT_CONFIG_FILES, DEFAULT_HEALTH_TIMEOUT,
    DEFAULT_PAUSE, DEFAULT_RATE_LIMIT_REQUESTS, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_THROTTLING_REQUESTS, DEFAULT_USER_AGENT,
};
