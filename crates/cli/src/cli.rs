// src/cli.rs
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// ciforge - CI build-environment recipe generator
///
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct ClapCli {
    /// Override the data directory (inventory, projects, mappings)
    ///
    #[clap(long, short = 'd', global = true)]
    pub(crate) data_dir: Option<PathBuf>,

    /// Show detailed output
    ///
    #[clap(long, short = 'v', global = true, default_value_t = false)]
    pub(crate) verbose: bool,

    /// Subcommand to execute
    ///
    #[clap(subcommand)]
    pub(crate) command: ClapCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum ClapCommands {
    /// List all known hosts
    ///
    Hosts,

    /// List all known projects
    ///
    Projects,

    /// Generate a Dockerfile for one host (doesn't access the host)
    ///
    Dockerfile(RecipeArgs),

    /// Generate environment variables for one host (doesn't access the host)
    ///
    Variables(RecipeArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct RecipeArgs {
    /// Host to generate the recipe for (accepts globs, must match one host)
    pub(crate) hosts: String,

    /// List of projects to consider (accepts globs)
    pub(crate) projects: String,

    /// Target architecture for cross compilation
    ///
    #[clap(long, short = 'x')]
    pub(crate) cross_arch: Option<String>,
}
