//! The probe suite: health check, scenario sequence and the text report.
mod console;
mod health;
mod runner;
mod scenarios;
mod summary;


pub use console::{Console, Marker};
pub use health::HealthCheck;
pub use runner::{SuiteReport, run_suite};
pub use scenarios::{DatabaseReport, ExchangeOutcome, ScenarioReport, list_messages, save_message};
