//! CLI for the repository duplicator.
//!
//! Run it twice: once without flags to create milestones, labels and issues,
//! then with `--update` to copy comments and issue state.

use clap::Parser;
use repo_duplicator::{
    Config, ErrorPolicy, MatchStrategy, Pass, RepoSlug, RunSummary, Runner, RunnerError, Tally,
    DEFAULT_API_URL,
};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Duplicate a GitHub repository's issues, milestones and labels.
///
/// You must run this twice: first without flags, then with `--update` to
/// copy issue comments and state.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub username to use.
    #[arg(short, long, env = "GITHUB_USERNAME")]
    username: String,

    /// GitHub password (or personal access token) to use.
    #[arg(short, long, env = "GITHUB_PASSWORD", hide_env_values = true)]
    password: String,

    /// Source repository to copy from, as `owner/repo`.
    #[arg(short, long)]
    source: RepoSlug,

    /// Destination repository to copy to, as `owner/repo`.
    #[arg(short, long)]
    destination: RepoSlug,

    /// Update existing issues with comments and state.
    #[arg(long)]
    update: bool,

    /// Print status messages.
    #[arg(short, long)]
    verbose: bool,

    /// Root of the GitHub REST API.
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// How source issues are matched with destination issues (`position` or `marker`).
    #[arg(long, default_value_t = MatchStrategy::Position)]
    match_by: MatchStrategy,

    /// Abort when a milestone can't be created instead of continuing.
    #[arg(long)]
    fail_fast: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse arguments
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.verbose);

    // Octocrab's TLS stack needs a process-wide crypto provider.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::from(0)
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG`, falling back to "info", or "debug"
///   when `--verbose` is given
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let config = Config::new(
        args.username,
        args.password,
        args.source,
        args.destination,
        Pass::from_update_flag(args.update),
    )
    .with_api_url(&args.api_url)?
    .with_match_strategy(args.match_by)
    .with_milestone_errors(ErrorPolicy::from_fail_fast(args.fail_fast));

    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!("  Pass: {}", summary.pass);

    match summary.pass {
        Pass::Create => {
            print_tally("Milestones", &summary.milestones);
            print_tally("Labels", &summary.labels);
            print_tally("Issues", &summary.issues);
        }
        Pass::Update => {
            println!("  Issues compared: {}", summary.issues_compared);
            println!("  Comments created: {}", summary.comments_created);
            println!("  States updated: {}", summary.states_updated);
            if summary.comment_fetch_failures > 0 {
                println!(
                    "  Issues with unreadable comments: {}",
                    summary.comment_fetch_failures
                );
            }
        }
    }

    if summary.has_failures() {
        println!("\nSome records could not be duplicated, see the warnings above.");
    }
}

fn print_tally(name: &str, tally: &Tally) {
    println!(
        "  {name}: {} created, {} skipped, {} failed",
        tally.created, tally.skipped, tally.failed
    );
}
