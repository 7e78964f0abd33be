use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bumpkit::cli::orchestration::{run_bump_workflow, WorkflowResult};
use bumpkit::config;
use bumpkit::git::Git2Repository;
use bumpkit::lockfile::{CommandLockRefresher, LockRefresher, NoLockRefresh};
use bumpkit::ui::{self, AutoApprove, Prompter, TerminalPrompter};

#[derive(clap::Parser)]
#[command(
    name = "bump-version",
    version,
    about = "Bump the project version, then optionally commit, tag and push it"
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

    #[arg(short, long, help = "Accept the default version and approve every prompt")]
    yes: bool,

    #[arg(short, long, help = "Print debug logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    bumpkit::cli::init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let repo = Git2Repository::open(&args.directory).context("Not in a git repository")?;
    let root = repo.workdir()?;

    let config = config::load_config(args.config.as_deref(), &root)
        .context("Error loading config")?;

    let refresher: Box<dyn LockRefresher> =
        match CommandLockRefresher::from_config(&config.bump.lockfile, &root) {
            Some(refresher) => Box::new(refresher),
            None => Box::new(NoLockRefresh),
        };

    let mut prompter: Box<dyn Prompter> = if args.yes {
        Box::new(AutoApprove)
    } else {
        Box::new(TerminalPrompter)
    };

    match run_bump_workflow(
        &root,
        &config.bump,
        &repo,
        prompter.as_mut(),
        refresher.as_ref(),
    )? {
        WorkflowResult::Cancelled => {}
        WorkflowResult::Bumped(summary) => {
            let state = match (summary.committed, summary.pushed) {
                (true, true) => "committed and pushed",
                (true, false) => "committed locally",
                _ => "not committed",
            };
            println!(
                "\n{} {} -> {} ({})\n",
                console::style("✓").green(),
                summary.previous,
                summary.version,
                state
            );
        }
    }

    Ok(())
}
