//! QPE Command-Line Interface
//!
//! Estimate eigenphases of catalog unitaries on the local simulator.
//!
//! ```text
//! qpe estimate --angle 0.25 --unitary rotation --precision 4 --shots 1000
//! qpe unitaries
//! qpe circuit --angle 0.25 --precision 3
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::RequestArgs;
use commands::{circuit, estimate, unitaries, version};

/// QPE - quantum phase estimation on a local statevector simulator
#[derive(Parser)]
#[command(name = "qpe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Engine configuration file (YAML)
    #[arg(short, long, global = true, env = "QPE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the phase of a catalog unitary
    Estimate {
        #[command(flatten)]
        request: RequestArgs,

        /// Backend to use
        #[arg(short, long, default_value = "simulator")]
        backend: String,

        /// Sampling seed for reproducible counts
        #[arg(long)]
        seed: Option<u64>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Print the phase estimation circuit as JSON
    Circuit {
        #[command(flatten)]
        request: RequestArgs,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the unitary families in the catalog
    Unitaries,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Estimate {
            request,
            backend,
            seed,
            format,
        } => estimate::execute(config, &request, &backend, seed, &format).await,

        Commands::Circuit { request, output } => {
            circuit::execute(config, &request, output.as_deref())
        }

        Commands::Unitaries => {
            unitaries::execute();
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
