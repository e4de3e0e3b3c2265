
use std::fs;
use std::process::Output;
use std::sync::Arc;

use tempfile::tempdir;

use support_single::{MockApi, run_probe, spawn_mock_api, unused_address};

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn describe(output: &Output) -> String {
    format!(
        "status: {:?}\nstdout: {}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn e2e_full_suite_against_mock_api() -> Result<(), String> {
    let api = Arc::new(MockApi::new(100));
    let (url, _server) = spawn_mock_api(Arc::clone(&api))?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_probe(
        dir.path(),
        [
            "-u",
            url.as_str(),
            "--pause",
            "0",
            "--throttling-requests",
            "2",
            "--rate-limit-requests",
            "3",
            "--concurrent-requests",
            "4",
            "--no-color",
        ],
    )?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let stdout = stdout_of(&output);
    for needle in [
        "API is online (DB: connected)",
        "Rate Limiting: 10 req/1s",
        "Throttling: disabled",
        "Test 1: Throttling",
        "Test 2: Rate limiting",
        "POST successful",
        "Saved with ID: 1",
        "Total messages: 1",
        "Test 5: Concurrent requests",
        "Tests complete!",
    ] {
        if !stdout.contains(needle) {
            return Err(format!("Missing '{}'\n{}", needle, describe(&output)));
        }
    }

    let gets = api
        .requests()
        .iter()
        .filter(|request| request.as_str() == "GET /api/get")
        .count();
    if gets != 9 {
        return Err(format!("Expected 9 GET probes, got {}", gets));
    }
    Ok(())
}

#[test]
fn e2e_rate_limit_scenario_from_config_file() -> Result<(), String> {
    let api = Arc::new(MockApi::new(10));
    let (url, _server) = spawn_mock_api(Arc::clone(&api))?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config = format!(
        "base_url = \"{}\"\npause = 0\nscenarios = [\"rate-limit\"]\n\n[rate_limit]\nrequests = 20\n",
        url
    );
    fs::write(dir.path().join("probe.toml"), config)
        .map_err(|err| format!("write config failed: {}", err))?;

    let output = run_probe(dir.path(), ["--no-color"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let stdout = stdout_of(&output);
    if stdout.matches("429 Rate Limited").count() != 10 {
        return Err(format!("Expected 10 rate limited lines\n{}", describe(&output)));
    }
    if !stdout.contains("10 (50%)") {
        return Err(format!("Missing share line\n{}", describe(&output)));
    }
    if stdout.contains("Test 1: Throttling") {
        return Err(format!("Unselected scenario ran\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_unreachable_api_stops_after_health_check() -> Result<(), String> {
    let url = unused_address()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_probe(
        dir.path(),
        ["-u", url.as_str(), "--health-timeout", "2s", "--no-color"],
    )?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let stdout = stdout_of(&output);
    if !stdout.contains("API is not responding") {
        return Err(format!("Missing failure line\n{}", describe(&output)));
    }
    if stdout.contains("Test 1: Throttling") || stdout.contains("Tests complete!") {
        return Err(format!("Scenarios ran after failed health check\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_rejects_invalid_base_url() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let output = run_probe(dir.path(), ["-u", "ftp://example.com"])?;
    if output.status.success() {
        return Err(format!("Expected failure\n{}", describe(&output)));
    }
    Ok(())
}
