mod builder;
mod config;
mod display;
mod error;
mod file_resolver;
mod packager;
mod prompt;
mod relocate;
mod types;

use clap::Parser;
use std::io;

use config::Config;
use display::DisplayManager;
use error::AppError;
use types::{BuildOutcome, RunSummary, Selection};

#[derive(Parser, Debug)]
#[clap(
    version = "0.1.0",
    about = "Packages assignment sources into pa5/first or pa5/second and builds them.",
    long_about = "Copies every *.c, *.h and makefile* in the current directory into \
                  pa5/first or pa5/second, runs make there, then moves pa5 into \
                  pa5_autograter when that folder exists."
)]
struct Cli {
    /// Variant to package (1 = first, 2 = second). Prompts when omitted.
    #[arg(short, long, value_name = "N")]
    selection: Option<String>,

    /// Do not run the build tool.
    #[arg(long)]
    no_build: bool,

    /// Leave pa5 where it is.
    #[arg(long)]
    no_relocate: bool,

    /// Exit with an error when the build fails.
    #[arg(long, conflicts_with = "no_build")]
    strict_build: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::new()?;
    config.run_build = !cli.no_build;
    config.relocate = !cli.no_relocate;
    config.strict_build = cli.strict_build;
    let display = DisplayManager::new();

    display
        .print_working_dir(&config.working_dir)
        .unwrap_or_else(|e| eprintln!("Display error: {}", e));

    let selection = match selection_from_args(&cli) {
        Some(selection) => selection,
        None => {
            let stdin = io::stdin();
            prompt::prompt_selection(&mut stdin.lock(), &mut io::stdout())
                .map_err(|e| AppError::IoError(format!("Failed to read selection: {}", e)))?
        }
    };

    let Some(summary) = packager::package(&config, selection, |progress| {
        display
            .print_progress(&config, progress)
            .unwrap_or_else(|e| eprintln!("Display error: {}", e));
    }) else {
        log::info!("No valid selection, nothing to do");
        return Ok(());
    };

    display
        .print_summary(&config, &summary)
        .unwrap_or_else(|e| eprintln!("Display error: {}", e));
    display
        .print_done()
        .unwrap_or_else(|e| eprintln!("Display error: {}", e));

    match strict_build_error(&config, &summary) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// The selection passed with `--selection`, or `None` when the prompt is needed.
fn selection_from_args(cli: &Cli) -> Option<Selection> {
    cli.selection.as_deref().map(Selection::parse)
}

/// Under `--strict-build`, turns a failed build into a fatal error.
fn strict_build_error(config: &Config, summary: &RunSummary) -> Option<AppError> {
    if !config.strict_build || !summary.build_failed() {
        return None;
    }
    let message = match &summary.build {
        Some(BuildOutcome::Finished { code: Some(code), .. }) => format!("exit status {}", code),
        Some(BuildOutcome::Finished { code: None, .. }) => "terminated by a signal".to_string(),
        Some(BuildOutcome::SpawnFailed { message, .. }) => message.clone(),
        None => "not run".to_string(),
    };
    Some(AppError::BuildFailed {
        dir: summary.target_dir.clone(),
        message,
    })
}
