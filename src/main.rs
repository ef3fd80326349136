use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use travis_bump_version::bump::ExternalBumpTool;
use travis_bump_version::cli::{BumpWorkflow, BumpWorkflowArgs};
use travis_bump_version::config::{self, Config};
use travis_bump_version::domain::{ApiToken, ExitOutcome, RepoSlug};
use travis_bump_version::git::Git2Repository;
use travis_bump_version::ui::{ConsoleReporter, Reporter};

/// Exit status when the bump tool or git itself fails
const FATAL_EXIT_CODE: u8 = 3;

#[derive(clap::Parser)]
#[command(
    name = "travis-bump-version",
    about = "Automatically bump version on successful Travis-CI builds"
)]
struct Args {
    #[arg(
        long,
        env = "TRAVIS_BUMP_API_TOKEN",
        hide_env_values = true,
        help = "GitHub API token. Always make sure this variable is encrypted first"
    )]
    api_token: String,

    #[arg(long, value_name = "OWNER/NAME", help = "Name of repo on GitHub, eg user/repo")]
    repo: RepoSlug,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(value_name = "FILE", help = "Bump version on FILE")]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitOutcome::UsageError.into()
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging();

    match run(args) {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            ConsoleReporter::new().error(&format!("{:#}", e));
            ExitCode::from(FATAL_EXIT_CODE)
        }
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("TRAVIS_BUMP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<ExitOutcome> {
    // A run with no files stops before anything is read
    let config = if args.files.is_empty() {
        Config::default()
    } else {
        config::load_config(args.config.as_deref()).context("Error loading configuration")?
    };

    let repository = Git2Repository::discover(".").configure(&config);
    let bump_tool = ExternalBumpTool::from_config(&config);
    let reporter = ConsoleReporter::new();

    let workflow_args = BumpWorkflowArgs {
        api_token: ApiToken::new(args.api_token),
        repo: args.repo,
        files: args.files,
    };

    let outcome = BumpWorkflow::new(&config, &repository, &bump_tool, &reporter)
        .run(&workflow_args)
        .context("Version bump aborted")?;

    Ok(outcome)
}
