use std::time::Duration;

use crate::args::{
    DEFAULT_BASE_URL, DEFAULT_CONCURRENT_REQUESTS, DEFAULT_HEALTH_TIMEOUT, DEFAULT_PAUSE,
    DEFAULT_RATE_LIMIT_REQUESTS, DEFAULT_REQUEST_TIMEOUT, DEFAULT_THROTTLING_REQUESTS, MAX_PARALLEL,
    MAX_SCENARIO_REQUESTS, PositiveUsize, ProbeArgs, ScenarioKind,
};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::suite::{ScenarioPlan, SuiteConfig, parallelism_for, parse_base_url};
use super::types::{ConfigFile, DurationValue};

/// Layers CLI flags over the config file over built-in defaults.
///
/// # Errors
///
/// Returns an error when a resolved value is invalid: bad base URL, zero
/// `max_parallel`, a request count above [`MAX_SCENARIO_REQUESTS`], a
/// `max_parallel` above [`MAX_PARALLEL`] or a malformed duration.
pub fn resolve_suite_config(args: &ProbeArgs, file: Option<ConfigFile>) -> AppResult<SuiteConfig> {
    let file = file.unwrap_or_default();

    let base_url = args
        .base_url
        .as_deref()
        .or(file.base_url.as_deref())
        .unwrap_or(DEFAULT_BASE_URL);
    let base_url = parse_base_url(base_url)?;

    let request_timeout = pick_duration(
        args.request_timeout,
        "timeout",
        file.timeout.as_ref(),
        DEFAULT_REQUEST_TIMEOUT,
        DurationValue::to_duration,
    )?;
    let health_timeout = pick_duration(
        args.health_timeout,
        "health_timeout",
        file.health_timeout.as_ref(),
        DEFAULT_HEALTH_TIMEOUT,
        DurationValue::to_duration,
    )?;
    let pause = pick_duration(
        args.pause,
        "pause",
        file.pause.as_ref(),
        DEFAULT_PAUSE,
        DurationValue::to_delay,
    )?;

    let throttling_requests = args
        .throttling_requests
        .or_else(|| file.throttling.as_ref().and_then(|section| section.requests))
        .unwrap_or(DEFAULT_THROTTLING_REQUESTS);
    let throttling_requests =
        at_most("throttling.requests", throttling_requests, MAX_SCENARIO_REQUESTS)?;
    let rate_limit_requests = args
        .rate_limit_requests
        .or_else(|| file.rate_limit.as_ref().and_then(|section| section.requests))
        .unwrap_or(DEFAULT_RATE_LIMIT_REQUESTS);
    let rate_limit_requests =
        at_most("rate_limit.requests", rate_limit_requests, MAX_SCENARIO_REQUESTS)?;
    let concurrent_requests = args
        .concurrent_requests
        .or_else(|| file.concurrent.as_ref().and_then(|section| section.requests))
        .unwrap_or(DEFAULT_CONCURRENT_REQUESTS);
    let concurrent_requests =
        at_most("concurrent.requests", concurrent_requests, MAX_SCENARIO_REQUESTS)?;
    let max_parallel = match args.max_parallel {
        Some(value) => value,
        None => match file.concurrent.as_ref().and_then(|section| section.max_parallel) {
            Some(value) => positive_field("concurrent.max_parallel", value)?,
            None => parallelism_for(concurrent_requests),
        },
    };
    at_most("concurrent.max_parallel", max_parallel.get(), MAX_PARALLEL)?;

    let kinds: Vec<ScenarioKind> = if !args.scenarios.is_empty() {
        args.scenarios.clone()
    } else if let Some(scenarios) = file.scenarios {
        scenarios
    } else {
        ScenarioKind::ALL.to_vec()
    };

    let scenarios = kinds
        .into_iter()
        .map(|kind| match kind {
            ScenarioKind::Throttling => ScenarioPlan::Throttling {
                requests: throttling_requests,
            },
            ScenarioKind::RateLimit => ScenarioPlan::RateLimit {
                requests: rate_limit_requests,
            },
            ScenarioKind::Post => ScenarioPlan::Post,
            ScenarioKind::Database => ScenarioPlan::Database,
            ScenarioKind::Concurrent => ScenarioPlan::Concurrent {
                requests: concurrent_requests,
                max_parallel,
            },
        })
        .collect();

    Ok(SuiteConfig {
        base_url,
        request_timeout,
        health_timeout,
        pause,
        scenarios,
    })
}

fn pick_duration(
    flag: Option<Duration>,
    field: &str,
    value: Option<&DurationValue>,
    default: Duration,
    convert: fn(&DurationValue) -> Result<Duration, ValidationError>,
) -> AppResult<Duration> {
    if let Some(flag) = flag {
        return Ok(flag);
    }
    value.map_or(Ok(default), |value| {
        convert(value).map_err(|err| {
            AppError::config(ConfigError::InvalidDuration {
                field: field.to_owned(),
                source: err,
            })
        })
    })
}

fn positive_field(field: &str, value: usize) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn at_most(field: &str, value: usize, max: usize) -> AppResult<usize> {
    if value > max {
        return Err(AppError::config(ConfigError::ValueTooLarge {
            field: field.to_owned(),
            value,
            max,
        }));
    }
    Ok(value)
}
