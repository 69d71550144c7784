//! ruleshare - rule file synchronizer
//!
//! A command line tool that keeps a directory of named rule files in sync
//! with remote sources (raw URLs, GitHub repositories, or configured
//! aliases), tracking provenance and content fingerprints in a lock file.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod error;
mod fetcher;
mod github;
mod hash;
mod lister;
mod naming;
mod resolver;
mod sync;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        if let Some(workspace) = &cli.workspace {
            eprintln!("Using workspace {}", workspace.display());
        }
    }

    let result = match cli.command {
        Commands::Init => commands::init::run(cli.workspace),
        Commands::Add(args) => commands::add::run(cli.workspace, args),
        Commands::AddAll(args) => commands::add_all::run(cli.workspace, args),
        Commands::Sync(args) => commands::sync::run(cli.workspace, args.force),
        Commands::Update => commands::sync::run(cli.workspace, true),
        Commands::Status => commands::status::run(cli.workspace),
        Commands::List => commands::list::run(cli.workspace),
        Commands::Remove(args) => commands::remove::run(cli.workspace, args),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
