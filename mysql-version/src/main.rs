//! Report MySQL version information from autoconf metadata.

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use std::{fmt::Write, fs, path::PathBuf};

use mysql_build::{extract_value, VersionInfo, PRODUCT};

/// Print version, base version and version id of the MySQL server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Product name in the AC_INIT line.
    #[arg(short, long, default_value = PRODUCT)]
    product: String,
    /// Additionally print the value of this key.
    #[arg(short, long = "key")]
    keys: Vec<String>,
    /// Log level.
    #[arg(short, long, default_value_t = LevelFilter::Warn)]
    level: LevelFilter,
    /// Autoconf input file.
    #[arg(default_value = "configure.in")]
    src: PathBuf,
}

/// Formats the report for the contents of an autoconf input file.
fn report(text: &str, args: &Args) -> Result<String> {
    let info = VersionInfo::from_configure(text, &args.product)
        .with_context(|| format!("no usable version of {} found", args.product))?;

    let mut out = String::new();
    writeln!(out, "VERSION={}", info.version)?;
    writeln!(out, "MYSQL_BASE_VERSION={}", info.base)?;
    writeln!(out, "MYSQL_VERSION_ID={}", info.id)?;

    for key in &args.keys {
        match extract_value(text, key) {
            Some(value) => writeln!(out, "{key}={value}")?,
            None => log::warn!("{key} not found"),
        }
    }

    Ok(out)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::builder().filter_level(args.level).init();

    let text = fs::read_to_string(&args.src).with_context(|| format!("cannot read {}", args.src.display()))?;
    let out = report(&text, &args).with_context(|| format!("cannot process {}", args.src.display()))?;
    print!("{out}");

    Ok(())
}
