//! Galley CLI - cookbook discovery and version resolution

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use galley::core::CookbookError;
use galley::util::diagnostic::emit;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.global.no_color;

    if let Err(e) = run(cli) {
        match e.downcast_ref::<CookbookError>() {
            Some(err) => emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.global.verbose {
        EnvFilter::new("galley=debug")
    } else {
        EnvFilter::new("galley=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.global.no_color)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let global = cli.global;

    match cli.command {
        Commands::List => commands::list::execute(&global),
        Commands::Show(args) => commands::show::execute(&global, args),
        Commands::Versions(args) => commands::versions::execute(&global, args),
        Commands::Satisfy(args) => commands::satisfy::execute(&global, args),
        Commands::Resolve(args) => commands::resolve::execute(&global, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
