//! Client-side probe harness for an HTTP API that applies rate limiting and
//! artificial throttling.
//!
//! The binary runs a fixed suite (health check, throttling latency, rate
//! limiting, POST, database round trip, concurrent burst) and prints a
//! human-readable report. The building blocks are public so the harness can
//! be driven directly: [`http`] sends probes and runs batches, [`metrics`]
//! summarizes them, [`api`] decodes response bodies and [`app`] runs the
//! suite against any [`http::Prober`].
pub mod api;
pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;

mod entry;
mod system;

pub use entry::run;
