//! MySQL Windows build configuration.
//!
//! Writes the compile-time settings passed as `NAME[=VALUE]` definitions to
//! `win/configure.data`, which is included by the CMake build.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::{path::PathBuf, process::ExitCode};

mod emitter;

/// Generate the MySQL Windows build configuration.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Opts {
    /// Output file.
    #[arg(short, long, env = "MYSQL_CONFIGURE_OUTPUT", default_value = "win/configure.data")]
    output: PathBuf,
    /// Log level.
    #[arg(short, long, default_value_t = LevelFilter::Warn)]
    level: LevelFilter,
    /// Build definitions.
    #[arg(value_name = "NAME[=VALUE]")]
    definitions: Vec<String>,
}

fn perform(opts: &Opts) -> Result<()> {
    log::debug!("processing {} definitions", opts.definitions.len());

    let settings = emitter::run(&opts.definitions, &opts.output)?;
    log::info!(
        "wrote {} with TCP port {} (default {})",
        opts.output.display(),
        settings.port,
        settings.default_port
    );

    Ok(())
}

/// Status line reported for the outcome of a run.
fn status(res: &Result<()>) -> String {
    match res {
        Ok(()) => "done!".to_string(),
        Err(err) => format!("Error: {err:#}"),
    }
}

fn main() -> ExitCode {
    let opts = Opts::parse();

    env_logger::builder().filter_level(opts.level).init();

    let res = perform(&opts);
    println!("{}", status(&res));

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
