use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use bumpkit::config;
use bumpkit::error::BumpkitError;
use bumpkit::sync::{run_sync, SyncOutcome};
use bumpkit::ui;

#[derive(clap::Parser)]
#[command(
    name = "sync-hook-version",
    version,
    about = "Align the lint hook revision in the pre-commit config with the lockfile"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(
        short = 'C',
        long,
        default_value = ".",
        help = "Run as if started in this directory"
    )]
    directory: PathBuf,

    #[arg(short, long, help = "Print debug logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    bumpkit::cli::init_logging(args.verbose);

    let config = match config::load_config(args.config.as_deref(), &args.directory) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    let sync = &config.sync;

    match run_sync(&args.directory, sync) {
        Ok(SyncOutcome::InSync { version }) => {
            ui::display_success(&format!(
                "{} is already pinned at {} in {}",
                sync.package,
                version,
                sync.hook_config.display()
            ));
        }
        Ok(SyncOutcome::Updated { from, to }) => {
            ui::display_success(&format!(
                "Updated {} hook in {} from v{} to v{}",
                sync.package,
                sync.hook_config.display(),
                from,
                to
            ));
        }
        Err(e @ BumpkitError::ReplacementNotFound { .. }) => {
            ui::display_error(&e.to_string());
            ui::display_status(&format!(
                "Please update the rev of {} in {} manually.",
                sync.hook_repo,
                sync.hook_config.display()
            ));
            std::process::exit(1);
        }
        Err(e) => {
            let e = anyhow::Error::from(e).context("Hook version sync failed");
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }

    Ok(())
}
