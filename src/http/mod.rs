//! Probe execution: single requests, sequential batches and a bounded worker pool.
mod client;
mod pool;
mod probe;


pub use client::build_client;
pub use pool::{run_concurrent, run_sequential};
pub use probe::{HttpProber, ProbeRequest, Prober, probe_once};
