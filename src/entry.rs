use std::io::IsTerminal;
use std::sync::Arc;

use clap::{CommandFactory, FromArgMatches};
use tracing::info;

use crate::app::{Console, run_suite};
use crate::args::ProbeArgs;
use crate::config::{SuiteConfig, load_config, resolve_suite_config};
use crate::error::AppResult;
use crate::http::{HttpProber, Prober, build_client};
use crate::system::logger::init_logging;

/// Parses the command line, resolves the suite and runs it on a fresh
/// multi-threaded runtime. Probe outcomes never change the exit status.
///
/// # Errors
///
/// Returns an error for invalid arguments or configuration, and when the
/// report cannot be written.
pub fn run() -> AppResult<()> {
    let args = parse_args()?;
    init_logging(args.verbose, args.no_color);

    let file = load_config(args.config.as_deref())?;
    let config = resolve_suite_config(&args, file)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(&config, args.no_color))
}

fn parse_args() -> AppResult<ProbeArgs> {
    let matches = ProbeArgs::command().get_matches();
    Ok(ProbeArgs::from_arg_matches(&matches)?)
}

async fn run_async(config: &SuiteConfig, no_color: bool) -> AppResult<()> {
    let stdout = std::io::stdout();
    let use_color = !no_color && stdout.is_terminal();
    if !use_color && !no_color {
        info!("Colors disabled because stdout is not a TTY.");
    }

    let prober: Arc<dyn Prober> = Arc::new(HttpProber::new(build_client()?));
    let mut console = Console::new(stdout.lock(), use_color);
    let report = run_suite(config, prober, &mut console).await?;
    if report.is_aborted() {
        info!("Run stopped at the health check");
    }
    Ok(())
}
