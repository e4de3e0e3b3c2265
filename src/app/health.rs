use std::io::Write;

use tracing::{error, warn};

use crate::api::{HealthReport, HealthStatus};
use crate::config::SuiteConfig;
use crate::error::AppResult;
use crate::http::{ProbeRequest, Prober};
use crate::metrics::ProbeOutcome;

use super::console::{Console, Marker};

pub(crate) const HEALTH_PATH: &str = "health";
/// `503` still carries a health body: the API is up but degraded.
const ACCEPTED_HEALTH_STATUSES: [u16; 2] = [200, 503];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthCheck {
    Online(HealthReport),
    UnexpectedStatus(u16),
    Unreachable(String),
}

pub(crate) async fn check_health(
    prober: &dyn Prober,
    config: &SuiteConfig,
) -> AppResult<HealthCheck> {
    let request = ProbeRequest::get(config.endpoint(HEALTH_PATH)?, config.health_timeout)
        .capture_body();
    let result = prober.probe(1, &request).await;

    Ok(match result.outcome {
        ProbeOutcome::Status(code) if ACCEPTED_HEALTH_STATUSES.contains(&code) => {
            HealthCheck::Online(HealthReport::parse(result.body.as_deref()))
        }
        ProbeOutcome::Status(code) => {
            warn!("Health check returned HTTP {}", code);
            HealthCheck::UnexpectedStatus(code)
        }
        ProbeOutcome::Failed { message, .. } => {
            error!("Health check failed: {}", message);
            HealthCheck::Unreachable(message)
        }
    })
}

pub(crate) fn report_health<W: Write>(
    console: &mut Console<W>,
    health: &HealthCheck,
) -> AppResult<()> {
    match health {
        HealthCheck::Online(report) => report_online(console, report),
        HealthCheck::UnexpectedStatus(code) => {
            console.blank()?;
            let mark = console.mark(Marker::Fail);
            console.line(format!("{} API returned unexpected status: {}", mark, code))
        }
        HealthCheck::Unreachable(message) => {
            console.blank()?;
            let mark = console.mark(Marker::Fail);
            console.line(format!("{} API is not responding: {}", mark, message))?;
            console.blank()?;
            console.line("Start the API first (for example: docker-compose up -d).")
        }
    }
}

fn report_online<W: Write>(console: &mut Console<W>, report: &HealthReport) -> AppResult<()> {
    console.blank()?;
    match &report.status {
        HealthStatus::Ok => {
            let mark = console.mark(Marker::Ok);
            console.line(format!(
                "{} API is online (DB: {})",
                mark, report.database_status
            ))?;
        }
        HealthStatus::Degraded => {
            let mark = console.mark(Marker::Warn);
            console.line(format!(
                "{} API is online but degraded (DB: {})",
                mark, report.database_status
            ))?;
            if let Some(db_error) = report.database_error.as_deref() {
                console.line(format!("  DB error: {}", db_error))?;
            }
        }
        HealthStatus::Other(status) => {
            let mark = console.mark(Marker::Unknown);
            console.line(format!(
                "{} API reported status '{}' (DB: {})",
                mark, status, report.database_status
            ))?;
        }
    }

    console.blank()?;
    console.line("Active configuration:")?;
    console.line(format!("  Rate Limiting: {}", report.rate_limit_label()))?;
    console.line(format!("  Throttling: {}", report.throttling_label()))
}
