//! Command line interface.
//!
//! Thin layer over the build pipeline: argument parsing, parameter
//! resolution and terminal output. The returned integer is the process exit
//! code (0 success, 1 build failure, 2 invalid input or output folder).

mod args;
mod output;
pub mod project;

pub use args::Args;
pub use output::ConsoleLog;

use crate::bundler::{BuildLog, LineClass, ProjectBuilder, ScappToolchain};
use crate::error::{BundlerError, CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let log = ConsoleLog::new(args.silent);

    let base = if let Some(selector) = &args.project {
        match project::load_project(selector)? {
            Some(record) => Some(record),
            None => {
                log.add(
                    &format!("Project not found in settings: {selector}"),
                    LineClass::Stderr,
                );
                log.status("Failed", None);
                return Ok(1);
            }
        }
    } else if let Some(config) = &args.config {
        Some(project::load_config(config)?)
    } else {
        None
    };

    let cwd = std::env::current_dir()?;
    let params = match project::resolve_parameters(&args, base, &cwd) {
        Ok(params) => params,
        Err(BundlerError::Cli(CliError::MissingArgument { argument })) => {
            print_usage(&log);
            log.add(
                &format!("Missing required argument: {argument}"),
                LineClass::Stderr,
            );
            log.status("Failed", None);
            return Ok(1);
        }
        Err(e) => return Err(e),
    };

    let builder = ProjectBuilder::new(params).map_err(BundlerError::Build)?;

    log.status("Starting build...", Some(0));
    let result = builder.assemble(&ScappToolchain::new(), &log).await;

    if result.ok {
        log.status("Success", Some(100));
        log.add("Build succeeded.", LineClass::Result);
    } else {
        log.status("Failed", Some(100));
        log.add(
            &format!("Build failed (exit code {}).", result.exit_code),
            LineClass::Stderr,
        );
    }
    Ok(result.exit_code)
}

fn print_usage(log: &dyn BuildLog) {
    log.add("Usage:", LineClass::Initial);
    log.add("  scapp_bundler --project <id|name>", LineClass::Initial);
    log.add("  scapp_bundler --config <project.json>", LineClass::Initial);
    log.add(
        "  scapp_bundler --exe app --resources path/to/app --out dist --logo icon.svg --targets winX64,mac [--silent]",
        LineClass::Initial,
    );
    log.add(
        "Required: --exe --resources --out --targets (unless --project/--config provides them)",
        LineClass::Stderr,
    );
}
