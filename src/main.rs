mod config;
mod error;
mod export;
mod ledger;
mod logging;
mod models;
mod run;
mod sheet;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let dirs = config::project_dirs()?;

    // Logging is best effort; the ledger works without it.
    match logging::init(dirs.data_dir()) {
        Ok(path) => tracing::debug!(path = %path.display(), "logging to file"),
        Err(e) => eprintln!("Warning: {e:#}"),
    }

    let config = config::Config::load(dirs.config_dir())?;
    tracing::info!(
        members = config.members,
        currency = %config.currency,
        "session started"
    );

    match args.len() {
        1 => run::as_tui(config),
        2.. => run::as_cli(&args, config),
        _ => {
            eprintln!("Usage: eventbudget [command]");
            Ok(())
        }
    }
}
