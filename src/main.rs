//! reword - CLI entry point.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use reword::SystemRunner;
use reword::config::{DEFAULT_LLM_COMMAND, DEFAULT_MODEL, ReviewConfig, default_pager};
use reword::git::{check_git_installed, resolve_range};
use reword::pager::{pager_available, print_to_stdout};
use reword::pipeline::{Pipeline, render};
use reword::review::{PromptVariant, check_model_installed};

/// Exit status for usage errors and failed runs.
const EXIT_FAILURE: u8 = 1;

/// Review commit messages in a range with an LLM and page the suggested rewrites.
#[derive(Parser, Debug)]
#[command(name = "reword")]
#[command(about = "Review commit messages in a range with an LLM and page the suggested rewrites")]
#[command(version)]
struct Cli {
    /// Start of commit range, exclusive (tag, commit hash, or branch)
    from: String,

    /// End of commit range, inclusive (defaults to HEAD)
    to: Option<String>,

    /// Model identifier passed to the model CLI
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Built-in review prompt to use
    #[arg(long, value_enum, default_value_t = PromptVariant::Rules)]
    style: PromptVariant,

    /// Read the review prompt from a file instead of using a built-in one
    #[arg(long, value_name = "PATH")]
    prompt_file: Option<PathBuf>,

    /// Model CLI executable
    #[arg(long, default_value = DEFAULT_LLM_COMMAND)]
    llm_command: String,

    /// Pager command (defaults to $REWORD_PAGER, then delta)
    #[arg(long)]
    pager: Option<String>,

    /// Print the diffs to stdout instead of paging them
    #[arg(long)]
    no_pager: bool,

    /// Run git in this directory
    #[arg(short = 'C', long = "repo", default_value = ".")]
    repo: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match parse_cli(std::env::args_os()) {
        Ok(cli) => cli,
        Err(status) => return ExitCode::from(status),
    };

    init_tracing(cli.verbose);

    ExitCode::from(exit_status(&run(cli).await))
}

/// Parse arguments, mapping usage errors to exit status 1 instead of clap's 2.
///
/// `--help` and `--version` print and exit with 0 as usual.
fn parse_cli<I, T>(args: I) -> Result<Cli, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|e| {
        if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
            e.exit();
        }
        let _ = e.print();
        EXIT_FAILURE
    })
}

/// Report a failed run on stderr and pick the process exit status.
fn exit_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_FAILURE
        }
    }
}

/// Filter used when `RUST_LOG` is unset. Per-commit progress is logged at info.
fn default_directive(verbose: bool) -> &'static str {
    if verbose { "reword=debug" } else { "reword=info" }
}

/// Log to stderr so the review on stdout or in the pager stays clean.
///
/// `RUST_LOG` wins over `--verbose` when set.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    // Step 1: Check prerequisites
    check_git_installed().context("git is required")?;

    // Step 2: Build configuration
    let mut config =
        ReviewConfig::new(&cli.model, cli.style.text()).with_command(&cli.llm_command);
    if let Some(path) = &cli.prompt_file {
        config = config
            .with_prompt_file(path)
            .with_context(|| format!("Failed to load prompt from {}", path.display()))?;
    }

    // Step 3: Resolve commit range
    let range = resolve_range(&cli.from, cli.to.as_deref());
    let runner = SystemRunner;
    let pipeline = Pipeline::new(&runner, &cli.repo, config);

    let commits = pipeline
        .commits(&range)
        .await
        .context("Failed to list commits")?;

    if commits.is_empty() {
        eprintln!("No commits in {}. Nothing to review.", range);
        return Ok(());
    }

    // The model CLI is only needed once there is something to review.
    check_model_installed(&cli.llm_command).context("A model CLI is required")?;

    eprintln!(
        "Reviewing {} commit{} in {} with {}...",
        commits.len(),
        if commits.len() == 1 { "" } else { "s" },
        range,
        pipeline.config().model
    );

    // Step 4: Review every commit and show the diffs. The first failed review
    // aborts the run before anything is shown.
    let pager = cli.pager.unwrap_or_else(default_pager);
    let use_pager = !cli.no_pager && pager_available(&pager);
    if !cli.no_pager && !use_pager {
        warn!("Pager '{}' not found, printing to stdout", pager);
    }

    if use_pager {
        pipeline.review_and_page(&commits, &pager).await?;
    } else {
        let reviews = pipeline.review_commits(&commits).await?;
        print_to_stdout(&render(&reviews))?;
    }

    Ok(())
}
