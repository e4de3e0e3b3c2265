use super::{
    ScenarioPlan, SuiteConfig, load_config_file, parse_delay_value, parse_duration_value,
    resolve_suite_config, types::ConfigFile,
};
use clap::Parser;
use std::time::Duration;
use tempfile::tempdir;

use crate::args::{MAX_PARALLEL, MAX_SCENARIO_REQUESTS, PositiveUsize, ProbeArgs, ScenarioKind};

fn no_args() -> Result<ProbeArgs, String> {
    ProbeArgs::try_parse_from(["throttle-probe"]).map_err(|err| format!("parse failed: {}", err))
}

#[test]
fn parse_toml_config_with_sections() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("probe.toml");
    let content = r#"
base_url = "http://api.internal:8080"
timeout = "3s"
health_timeout = 2
pause = "250ms"
scenarios = ["rate-limit", "concurrent"]

[rate_limit]
requests = 50

[concurrent]
requests = 30
max_parallel = 6
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.base_url.as_deref() != Some("http://api.internal:8080") {
        return Err("Unexpected base_url".to_owned());
    }
    let scenarios = config.scenarios.ok_or("Expected scenarios")?;
    if scenarios != vec![ScenarioKind::RateLimit, ScenarioKind::Concurrent] {
        return Err(format!("Unexpected scenarios: {:?}", scenarios));
    }
    let concurrent = config.concurrent.ok_or("Expected concurrent section")?;
    if concurrent.max_parallel != Some(6) {
        return Err("Unexpected max_parallel".to_owned());
    }
    Ok(())
}

#[test]
fn parse_json_config_with_aliases() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("probe.json");
    let content = r#"{
  "base_url": "http://localhost:9999",
  "request_timeout": "1s",
  "concurrent": { "requests": 4, "workers": 2 }
}"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.timeout.is_none() {
        return Err("Expected request_timeout alias to populate timeout".to_owned());
    }
    let concurrent = config.concurrent.ok_or("Expected concurrent section")?;
    if concurrent.max_parallel != Some(2) {
        return Err("Expected workers alias to populate max_parallel".to_owned());
    }
    Ok(())
}

#[test]
fn load_config_rejects_unknown_extension() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("probe.yaml");
    std::fs::write(&path, "base_url: x").map_err(|err| format!("write failed: {}", err))?;
    if load_config_file(&path).is_ok() {
        return Err("Expected yaml config to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn resolve_defaults_without_file() -> Result<(), String> {
    let config = resolve_suite_config(&no_args()?, None).map_err(|err| err.to_string())?;
    if config.base_url.as_str() != "http://localhost:8888/" {
        return Err(format!("Unexpected base url: {}", config.base_url));
    }
    if config.request_timeout != Duration::from_secs(10) {
        return Err("Unexpected request timeout".to_owned());
    }
    if config.health_timeout != Duration::from_secs(5) {
        return Err("Unexpected health timeout".to_owned());
    }
    let expected = vec![
        ScenarioPlan::Throttling { requests: 5 },
        ScenarioPlan::RateLimit { requests: 20 },
        ScenarioPlan::Post,
        ScenarioPlan::Database,
        ScenarioPlan::Concurrent {
            requests: 10,
            max_parallel: PositiveUsize::try_from(10).map_err(|err| err.to_string())?,
        },
    ];
    if config.scenarios != expected {
        return Err(format!("Unexpected scenarios: {:?}", config.scenarios));
    }
    Ok(())
}

#[test]
fn resolve_prefers_cli_over_file() -> Result<(), String> {
    let args = ProbeArgs::try_parse_from([
        "throttle-probe",
        "--base-url",
        "http://cli.example:1234/prefix",
        "--rate-limit-requests",
        "7",
        "-s",
        "rate-limit",
    ])
    .map_err(|err| format!("parse failed: {}", err))?;
    let file = ConfigFile {
        base_url: Some("http://file.example".to_owned()),
        scenarios: Some(vec![ScenarioKind::Post]),
        ..ConfigFile::default()
    };

    let config = resolve_suite_config(&args, Some(file)).map_err(|err| err.to_string())?;
    if config.base_url.as_str() != "http://cli.example:1234/prefix/" {
        return Err(format!("Unexpected base url: {}", config.base_url));
    }
    if config.scenarios != vec![ScenarioPlan::RateLimit { requests: 7 }] {
        return Err(format!("Unexpected scenarios: {:?}", config.scenarios));
    }
    Ok(())
}

#[test]
fn resolve_rejects_zero_max_parallel_in_file() -> Result<(), String> {
    let file: ConfigFile = toml::from_str("[concurrent]\nmax_parallel = 0\n")
        .map_err(|err| format!("toml failed: {}", err))?;
    if resolve_suite_config(&no_args()?, Some(file)).is_ok() {
        return Err("Expected zero max_parallel to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn resolve_rejects_non_http_base_url() -> Result<(), String> {
    let file = ConfigFile {
        base_url: Some("ftp://example.com".to_owned()),
        ..ConfigFile::default()
    };
    if resolve_suite_config(&no_args()?, Some(file)).is_ok() {
        return Err("Expected ftp base url to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn resolve_allows_zero_pause_from_file() -> Result<(), String> {
    let file: ConfigFile =
        toml::from_str("pause = 0\n").map_err(|err| format!("toml failed: {}", err))?;
    let config = resolve_suite_config(&no_args()?, Some(file)).map_err(|err| err.to_string())?;
    if !config.pause.is_zero() {
        return Err(format!("Expected zero pause, got {:?}", config.pause));
    }
    Ok(())
}

#[test]
fn endpoint_joins_under_base_path() -> Result<(), String> {
    let config = SuiteConfig::new("http://localhost:8888/v1").map_err(|err| err.to_string())?;
    let url = config.endpoint("api/db/messages").map_err(|err| err.to_string())?;
    if url.as_str() != "http://localhost:8888/v1/api/db/messages" {
        return Err(format!("Unexpected endpoint: {}", url));
    }
    Ok(())
}

#[test]
fn parse_duration_units() -> Result<(), String> {
    let cases = [
        ("150ms", Duration::from_millis(150)),
        ("2", Duration::from_secs(2)),
        ("3m", Duration::from_secs(180)),
        ("1h", Duration::from_secs(3600)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration_value(input).map_err(|err| err.to_string())?;
        if parsed != expected {
            return Err(format!("{} parsed to {:?}", input, parsed));
        }
    }
    if parse_duration_value("0ms").is_ok() {
        return Err("Expected zero duration to be rejected".to_owned());
    }
    if parse_duration_value("5d").is_ok() {
        return Err("Expected unknown unit to be rejected".to_owned());
    }
    if parse_delay_value("0ms").map_err(|err| err.to_string())? != Duration::ZERO {
        return Err("Expected zero delay to be accepted".to_owned());
    }
    Ok(())
}

#[test]
fn resolve_rejects_request_counts_above_limit() -> Result<(), String> {
    let too_many = (MAX_SCENARIO_REQUESTS + 1).to_string();
    for flag in [
        "--throttling-requests",
        "--rate-limit-requests",
        "--concurrent-requests",
    ] {
        let args = ProbeArgs::try_parse_from(["throttle-probe", flag, too_many.as_str()])
            .map_err(|err| format!("parse failed: {}", err))?;
        if resolve_suite_config(&args, None).is_ok() {
            return Err(format!("Expected {} {} to be rejected", flag, too_many));
        }
    }

    let at_limit = MAX_SCENARIO_REQUESTS.to_string();
    let args = ProbeArgs::try_parse_from(["throttle-probe", "--rate-limit-requests", at_limit.as_str()])
        .map_err(|err| format!("parse failed: {}", err))?;
    resolve_suite_config(&args, None).map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn resolve_caps_default_parallelism_and_rejects_oversized_pools() -> Result<(), String> {
    let args = ProbeArgs::try_parse_from(["throttle-probe", "--concurrent-requests", "5000"])
        .map_err(|err| format!("parse failed: {}", err))?;
    let config = resolve_suite_config(&args, None).map_err(|err| err.to_string())?;
    let concurrent = config
        .scenarios
        .iter()
        .find(|plan| plan.kind() == ScenarioKind::Concurrent);
    match concurrent {
        Some(ScenarioPlan::Concurrent {
            requests: 5000,
            max_parallel,
        }) if max_parallel.get() == MAX_PARALLEL => {}
        other => return Err(format!("Unexpected concurrent plan: {:?}", other)),
    }

    let file: ConfigFile = toml::from_str("[concurrent]\nmax_parallel = 100000\n")
        .map_err(|err| format!("toml failed: {}", err))?;
    if resolve_suite_config(&no_args()?, Some(file)).is_ok() {
        return Err("Expected oversized max_parallel to be rejected".to_owned());
    }
    Ok(())
}
