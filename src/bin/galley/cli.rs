//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Galley - cookbook discovery and version resolution
#[derive(Parser)]
#[command(name = "galley")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Cookbook search root; repeat to add more (later roots override earlier ones)
    #[arg(
        short = 'p',
        long = "cookbook-path",
        global = true,
        env = "GALLEY_COOKBOOK_PATH",
        value_delimiter = ':'
    )]
    pub cookbook_path: Vec<PathBuf>,

    /// Solo mode: accept cookbooks without metadata.json
    #[arg(long, global = true)]
    pub solo: bool,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every cookbook with its highest version
    List,

    /// Show the files and metadata of a cookbook
    Show(ShowArgs),

    /// List the known versions of a cookbook
    Versions(VersionsArgs),

    /// List the versions of a cookbook matching a constraint
    Satisfy(SatisfyArgs),

    /// Pick the highest version matching every constraint
    Resolve(ResolveArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    /// Cookbook name
    pub name: String,

    /// Exact version (defaults to the highest)
    #[arg(long)]
    pub version: Option<String>,
}

#[derive(Args)]
pub struct VersionsArgs {
    /// Cookbook name
    pub name: String,
}

#[derive(Args)]
pub struct SatisfyArgs {
    /// Cookbook name
    pub name: String,

    /// Constraint such as `>= 0.1.0` (all versions when omitted)
    pub constraint: Option<String>,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Cookbook name
    pub name: String,

    /// Constraints that must all hold
    pub constraints: Vec<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
