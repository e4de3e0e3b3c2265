use serde::Deserialize;

use super::{lenient, or_missing, parse_lenient};

#[derive(Debug, Default, Deserialize)]
struct HealthBody {
    #[serde(default, deserialize_with = "lenient")]
    status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    database: Option<DatabaseBody>,
    #[serde(default, deserialize_with = "lenient")]
    configuration: Option<ConfigurationBody>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabaseBody {
    #[serde(default, deserialize_with = "lenient")]
    status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigurationBody {
    #[serde(default, deserialize_with = "lenient")]
    rate_limiting: Option<RateLimitingBody>,
    #[serde(default, deserialize_with = "lenient")]
    throttling: Option<ThrottlingBody>,
}

#[derive(Debug, Default, Deserialize)]
struct RateLimitingBody {
    #[serde(default, deserialize_with = "lenient")]
    requests: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    period_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ThrottlingBody {
    #[serde(default, deserialize_with = "lenient")]
    enabled: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    min_ms: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    max_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Ok,
    Degraded,
    /// Any other value, or `unknown` when the field is missing.
    Other(String),
}

impl HealthStatus {
    fn from_field(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("ok") => HealthStatus::Ok,
            Some("degraded") => HealthStatus::Degraded,
            Some(other) => HealthStatus::Other(other.to_owned()),
            None => HealthStatus::Other("unknown".to_owned()),
        }
    }
}

/// Resolved `GET /health` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub status: HealthStatus,
    /// Fallback: `unknown`.
    pub database_status: String,
    pub database_error: Option<String>,
    pub rate_limit_requests: Option<u64>,
    pub rate_limit_period_seconds: Option<u64>,
    /// Fallback: `false`.
    pub throttling_enabled: bool,
    pub throttle_min_ms: Option<u64>,
    pub throttle_max_ms: Option<u64>,
}

impl HealthReport {
    #[must_use]
    pub fn parse(body: Option<&[u8]>) -> Self {
        let body: HealthBody = parse_lenient(body, "health");
        let database = body.database.unwrap_or_default();
        let configuration = body.configuration.unwrap_or_default();
        let rate_limiting = configuration.rate_limiting.unwrap_or_default();
        let throttling = configuration.throttling.unwrap_or_default();

        Self {
            status: HealthStatus::from_field(body.status),
            database_status: database.status.unwrap_or_else(|| "unknown".to_owned()),
            database_error: database.error,
            rate_limit_requests: rate_limiting.requests,
            rate_limit_period_seconds: rate_limiting.period_seconds,
            throttling_enabled: throttling.enabled.unwrap_or(false),
            throttle_min_ms: throttling.min_ms,
            throttle_max_ms: throttling.max_ms,
        }
    }

    /// `"10 req/1s"`, with `?` for missing parts.
    #[must_use]
    pub fn rate_limit_label(&self) -> String {
        format!(
            "{} req/{}s",
            or_missing(self.rate_limit_requests),
            or_missing(self.rate_limit_period_seconds)
        )
    }

    /// `"100-500ms"`, or `"disabled"`.
    #[must_use]
    pub fn throttling_label(&self) -> String {
        if !self.throttling_enabled {
            return "disabled".to_owned();
        }
        format!(
            "{}-{}ms",
            or_missing(self.throttle_min_ms),
            or_missing(self.throttle_max_ms)
        )
    }
}
