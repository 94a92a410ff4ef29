use std::fs::OpenOptions;
use std::panic;
use std::process;
use std::sync::Arc;

use tracing::error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use termlife::app;

/// Append-only side log for recovered panics and fatal errors. The
/// terminal itself is busy showing the simulation.
const LOG_FILE: &str = "errors.log";

fn init_logging() -> anyhow::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(LOG_FILE)?;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("could not open {LOG_FILE}: {e:#}");
        process::exit(1);
    }

    // Log the diagnostic before the default hook unwinds the process.
    // Unwinding drops the surface, which restores the terminal.
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        error!("run time panic: {info}");
        default_hook(info);
    }));

    if let Err(e) = app::run() {
        error!("fatal: {e:#}");
        eprintln!("{e:#}");
        process::exit(1);
    }
}
