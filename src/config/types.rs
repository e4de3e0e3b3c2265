use std::time::Duration;

use serde::Deserialize;

use crate::args::ScenarioKind;
use crate::error::ValidationError;

/// On-disk configuration. Every field is optional; unset fields fall back to
/// CLI flags and then to built-in defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    #[serde(alias = "request_timeout")]
    pub timeout: Option<DurationValue>,
    pub health_timeout: Option<DurationValue>,
    pub pause: Option<DurationValue>,
    pub scenarios: Option<Vec<ScenarioKind>>,
    pub throttling: Option<BatchSection>,
    pub rate_limit: Option<BatchSection>,
    pub concurrent: Option<ConcurrentSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BatchSection {
    pub requests: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConcurrentSection {
    pub requests: Option<usize>,
    #[serde(alias = "workers")]
    pub max_parallel: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => super::parse_duration_value(text),
        }
    }

    pub(crate) fn to_delay(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => super::parse_delay_value(text),
        }
    }
}
