//! gatekeep CLI: runs the pre-merge quality gate over a change set.
//!
//! The report goes to stdout; logs and fatal errors go to stderr.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use gatekeep_analysis::enforcement::exit::{codes, exit_code_for};
use gatekeep_analysis::enforcement::reporters::create_reporter;
use gatekeep_analysis::enforcement::GateEngine;
use gatekeep_core::errors::GatekeepErrorCode;
use gatekeep_core::tracing::init_tracing;
use gatekeep_core::GateConfig;

mod cli;
mod error;

use cli::Cli;
use error::{CliError, CliResult};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::debug!(code = e.error_code(), "gate could not run");
            eprintln!("{}", e.tagged());
            ExitCode::from(codes::INFRASTRUCTURE)
        }
    }
}

fn run(cli: &Cli) -> CliResult<u8> {
    let config = GateConfig::load(&cli.root, cli.config.as_deref(), Some(&cli.overrides()))?;
    let change_set = cli.change_set()?;
    tracing::debug!(paths = change_set.len(), "change set loaded");

    let engine = GateEngine::from_config(&config)?;
    let verdict = engine.run_change_set(&change_set, &config)?;

    let format = config.report.effective_format();
    let reporter = create_reporter(format, config.report.effective_color())
        .ok_or_else(|| CliError::UnknownFormat(format.to_string()))?;
    let report = reporter.generate(&verdict).map_err(CliError::Render)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(report.as_bytes())?;
    stdout.flush()?;

    Ok(exit_code_for(&verdict))
}
