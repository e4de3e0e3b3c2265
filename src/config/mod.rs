//! Configuration loading and resolution into a [`SuiteConfig`].
mod apply;
mod loader;
mod parse;
mod suite;
pub mod types;

#[cfg(test)]
mod tests;

pub use apply::resolve_suite_config;
pub use loader::load_config;
pub use suite::{ScenarioPlan, SuiteConfig};

#[cfg(test)]
pub(crate) use loader::load_config_file;
pub(crate) use parse::{parse_delay_value, parse_duration_value};
