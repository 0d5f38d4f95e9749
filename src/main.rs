use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

mod cache;
mod check;
mod clean;
mod config;
mod corpus;
mod error_format;
mod export;
mod init;
mod search;
mod stats;
mod syntax;

use clean::clean;
use config::Config;
use corpus::{LoadContext, load_table};
use init::init_config;

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser)]
#[command(name = "doxidx")]
#[command(about = "A fast inspector for Doxygen search indexes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Re-parse all shards (ignore cache)
    #[arg(short, long, global = true)]
    force: bool,

    /// Documentation tree to load (overrides doxidx.toml)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prefix search over symbol keys
    Search {
        /// Query, matched case-insensitively against entry keys
        query: String,
    },
    /// Exact key lookup
    Lookup {
        /// Search key (e.g. "sma")
        key: String,
    },
    /// Show index statistics
    Stats,
    /// Verify index invariants and round-trip idempotence
    Check,
    /// Re-serialize the index
    Export {
        /// Output format: json or js
        #[arg(long, default_value = "json")]
        format: String,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Interactive search mode
    Interactive,
    /// Initialize a new doxidx.toml configuration file (--force overwrites)
    Init,
    /// Remove the parse cache
    Clean,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    let cli = Cli::parse();

    let config = Config::load();

    let ctx = LoadContext {
        config: config.clone(),
        verbose: cli.verbose,
        force: cli.force,
    };
    let dir = cli.dir.as_deref();

    let result = match cli.command {
        Commands::Search { query } => load_table(&ctx, dir).and_then(|table| {
            search::search_symbols(&table, &query, config.max_results, cli.verbose)
        }),
        Commands::Lookup { key } => {
            load_table(&ctx, dir).and_then(|table| search::lookup_key(&table, &key))
        }
        Commands::Stats => load_table(&ctx, dir).and_then(|table| stats::show_stats(&table)),
        Commands::Check => {
            load_table(&ctx, dir).and_then(|table| check::check_index(&table, cli.verbose))
        }
        Commands::Export { format, output } => load_table(&ctx, dir)
            .and_then(|table| export::export_index(&table, &format, output.as_deref())),
        Commands::Interactive => load_table(&ctx, dir)
            .and_then(|table| search::interactive_search(&table, config.max_results)),
        Commands::Init => init_config(cli.force),
        Commands::Clean => clean(&config),
    };

    if let Err(e) = result {
        eprintln!("\n{} {}", "❌".red(), e.red());
        std::process::exit(1);
    }
}
