//! Turns parsed arguments into a launch and carries it out.
//!
//! Both entry points echo their parameters as JSON first, then either launch
//! the external runtime or (for the server launcher) reject the model type.

use crate::config::LauncherConfig;
use crate::core::launch::{LaunchSpec, Launcher, SPAWN_FAILURE_EXIT_CODE};
use crate::core::params::{to_pretty_json, GanKind, RunParams, ServeParams};
use anyhow::{Context, Result};
use std::io::Write;

pub const WRONG_TYPE_MESSAGE: &str = "Error: wrong type arguments!";

/// Exit code of the server launcher when the model type is rejected.
pub const REJECTED_EXIT_CODE: u8 = 1;

/// Result of deciding what the server launcher should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServeDispatch {
    Launched(LaunchSpec),
    Rejected,
}

/// The training command, pinned to one GPU when `multi` is set.
///
/// `gan_type` is echoed but never changes the command.
pub fn plan_training(params: &RunParams, launcher: &LauncherConfig) -> LaunchSpec {
    let spec = LaunchSpec::new(&launcher.program)
        .arg(&launcher.train_script)
        .current_dir(launcher.workdir.clone());

    if params.multi.is_set() {
        spec.env(&launcher.device_env, launcher.pinned_device.to_string())
    } else {
        spec
    }
}

pub fn plan_serving(params: &ServeParams, launcher: &LauncherConfig) -> ServeDispatch {
    match params.kind() {
        Some(GanKind::Pggan) => ServeDispatch::Launched(
            LaunchSpec::new(&launcher.program)
                .arg(&launcher.serve_script)
                .current_dir(launcher.workdir.clone()),
        ),
        None => ServeDispatch::Rejected,
    }
}

/// Echo `params`, then run the training command. Returns the process exit code.
pub fn run_training<L: Launcher, W: Write>(
    params: &RunParams,
    config: &LauncherConfig,
    launcher: &L,
    dry_run: bool,
    out: &mut W,
) -> Result<u8> {
    tracing::debug!(?params, ?config, "Parsed runner arguments");
    echo(params, out)?;
    execute(&plan_training(params, config), launcher, dry_run, out)
}

/// Echo `params`, then run the serving command or reject the model type.
pub fn run_server<L: Launcher, W: Write>(
    params: &ServeParams,
    config: &LauncherConfig,
    launcher: &L,
    dry_run: bool,
    out: &mut W,
) -> Result<u8> {
    tracing::debug!(?params, ?config, "Parsed server arguments");
    echo(params, out)?;

    match plan_serving(params, config) {
        ServeDispatch::Launched(spec) => execute(&spec, launcher, dry_run, out),
        ServeDispatch::Rejected => {
            tracing::warn!(gan_type = %params.gan_type, "Unrecognized model type");
            writeln!(out, "{WRONG_TYPE_MESSAGE}")?;
            Ok(REJECTED_EXIT_CODE)
        }
    }
}

fn echo<T: serde::Serialize, W: Write>(params: &T, out: &mut W) -> Result<()> {
    writeln!(out, "{}", to_pretty_json(params)?).context("Failed to write parameters")
}

fn execute<L: Launcher, W: Write>(
    spec: &LaunchSpec,
    launcher: &L,
    dry_run: bool,
    out: &mut W,
) -> Result<u8> {
    if dry_run {
        writeln!(out, "{spec}")?;
        return Ok(0);
    }

    // The child shares our stdout
    out.flush()?;

    tracing::info!(command = %spec, "Launching");
    match launcher.launch(spec) {
        Ok(outcome) => {
            if outcome.success() {
                tracing::info!("`{}` finished with {outcome}", spec.program);
            } else {
                tracing::warn!("`{}` finished with {outcome}", spec.program);
            }
            Ok(outcome.exit_code())
        }
        Err(e) => {
            tracing::error!("Failed to launch `{}`: {e}", spec.program);
            Ok(SPAWN_FAILURE_EXIT_CODE)
        }
    }
}
