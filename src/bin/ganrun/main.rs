mod cli;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use ganrun::config::load_config;
use ganrun::core::{dispatch::run_training, launch::ProcessLauncher};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let args = cli::GanRun::parse();
    ganrun::logging::init(args.verbose.tracing_level_filter());

    if let Some(cli::Commands::Completion { shell }) = args.command {
        let mut cmd = cli::GanRun::command();
        ganrun::completion::generate_to_stdout(shell, &mut cmd, "ganrun");
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(args.config.as_ref())?;
    let code = run_training(
        &args.params(),
        &config.launcher,
        &ProcessLauncher,
        args.dry_run,
        &mut std::io::stdout().lock(),
    )?;
    Ok(ExitCode::from(code))
}
