mod cli;
mod commands;
mod tables;

use std::{path::PathBuf, process};

use anyhow::Context;
use ciforge::fs::{FileSystem, real};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::{cli::ClapCli, commands::dispatch_command};

fn main() -> anyhow::Result<()> {
    let args = ClapCli::parse();
    init_tracing(args.verbose);
    debug!("CLI arguments: {:#?}", &args);

    let data_dir = resolve_data_dir(args.data_dir.as_deref())?;
    debug!("Data directory: {}", data_dir.display());

    let exit_code = dispatch_command(&args.command, &data_dir);

    process::exit(exit_code)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_data_dir(override_dir: Option<&std::path::Path>) -> anyhow::Result<PathBuf> {
    match override_dir {
        Some(dir) => real::RealFileSystem
            .expand_path(dir)
            .context("Failed to expand data directory path"),
        None => real::default_data_dir().context("Failed to locate the data directory"),
    }
}
