use std::time::Duration;

use url::Url;

use crate::args::{
    DEFAULT_CONCURRENT_REQUESTS, DEFAULT_HEALTH_TIMEOUT, DEFAULT_PAUSE,
    DEFAULT_RATE_LIMIT_REQUESTS, DEFAULT_REQUEST_TIMEOUT, DEFAULT_THROTTLING_REQUESTS, MAX_PARALLEL,
    PositiveUsize, ScenarioKind,
};
use crate::error::{AppError, AppResult, ConfigError, HttpError};

/// One step of the suite with its resolved request counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioPlan {
    Throttling {
        requests: usize,
    },
    RateLimit {
        requests: usize,
    },
    Post,
    Database,
    Concurrent {
        requests: usize,
        max_parallel: PositiveUsize,
    },
}

impl ScenarioPlan {
    #[must_use]
    pub const fn kind(&self) -> ScenarioKind {
        match self {
            ScenarioPlan::Throttling { .. } => ScenarioKind::Throttling,
            ScenarioPlan::RateLimit { .. } => ScenarioKind::RateLimit,
            ScenarioPlan::Post => ScenarioKind::Post,
            ScenarioPlan::Database => ScenarioKind::Database,
            ScenarioPlan::Concurrent { .. } => ScenarioKind::Concurrent,
        }
    }
}

/// Everything the suite orchestrator needs. Built once, never mutated during a run.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Always ends with `/` so relative endpoint paths join under it.
    pub base_url: Url,
    pub request_timeout: Duration,
    pub health_timeout: Duration,
    pub pause: Duration,
    pub scenarios: Vec<ScenarioPlan>,
}

impl SuiteConfig {
    /// Default suite against `base_url`: every scenario with its stock request count.
    ///
    /// # Errors
    ///
    /// Returns an error when `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> AppResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
            pause: DEFAULT_PAUSE,
            scenarios: ScenarioKind::ALL
                .iter()
                .map(|kind| default_plan(*kind))
                .collect(),
        })
    }

    /// Resolves an endpoint path (`"health"`, `"api/get"`, ...) against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url.join(path).map_err(|err| {
            AppError::http(HttpError::JoinUrlFailed {
                url: path.to_owned(),
                source: err,
            })
        })
    }
}

pub(crate) fn default_plan(kind: ScenarioKind) -> ScenarioPlan {
    match kind {
        ScenarioKind::Throttling => ScenarioPlan::Throttling {
            requests: DEFAULT_THROTTLING_REQUESTS,
        },
        ScenarioKind::RateLimit => ScenarioPlan::RateLimit {
            requests: DEFAULT_RATE_LIMIT_REQUESTS,
        },
        ScenarioKind::Post => ScenarioPlan::Post,
        ScenarioKind::Database => ScenarioPlan::Database,
        ScenarioKind::Concurrent => ScenarioPlan::Concurrent {
            requests: DEFAULT_CONCURRENT_REQUESTS,
            max_parallel: parallelism_for(DEFAULT_CONCURRENT_REQUESTS),
        },
    }
}

/// One worker per request, floored at a single worker for empty batches and
/// capped at [`MAX_PARALLEL`].
pub(crate) fn parallelism_for(requests: usize) -> PositiveUsize {
    PositiveUsize::try_from(requests.clamp(1, MAX_PARALLEL)).unwrap_or(PositiveUsize::MIN)
}

pub(crate) fn parse_base_url(value: &str) -> AppResult<Url> {
    let mut url = Url::parse(value.trim()).map_err(|err| {
        AppError::config(ConfigError::InvalidBaseUrl {
            url: value.to_owned(),
            source: err,
        })
    })?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AppError::config(ConfigError::UnsupportedScheme {
                scheme: other.to_owned(),
            }));
        }
    }
    if url.cannot_be_a_base() {
        return Err(AppError::config(ConfigError::BaseUrlCannotBeABase {
            url: value.to_owned(),
        }));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
