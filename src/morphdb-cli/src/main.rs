mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use config::Config;
use morphdb::HttpSource;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;

/// How a run ended when no error was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunStatus {
    Completed,
    /// Neither a class nor `--all` was given; help was printed
    UsageError,
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Completed => ExitCode::SUCCESS,
            RunStatus::UsageError => ExitCode::FAILURE,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "morphdb=info,morphdb_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(&cli).map(ExitCode::from)
}

fn run(cli: &Cli) -> Result<RunStatus> {
    if cli.list_classes {
        commands::list_classes();
        return Ok(RunStatus::Completed);
    }

    let Some(selection) = cli.selection() else {
        Cli::command().print_help()?;
        return Ok(RunStatus::UsageError);
    };

    let config = Config::load()?;
    let source = HttpSource::new(config.resolve_base_url(cli.base_url.as_deref()));
    let out_dir = config.resolve_output_dir(cli.output.as_deref());

    commands::build(
        &source,
        &selection,
        &out_dir,
        cli.format.into(),
        cli.combined.then(|| cli.combined_format.into()),
    )?;

    Ok(RunStatus::Completed)
}
