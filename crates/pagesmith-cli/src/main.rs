//! Pagesmith CLI
//!
//! Developer tool for validating design snapshots and exporting page code.

use anyhow::Result;
use clap::{Parser, Subcommand};
use pagesmith_core::Dialect;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Pagesmith - compile canvas designs into markup and stylesheets
#[derive(Parser)]
#[command(name = "pagesmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (or project directory)
    #[arg(short, long, default_value = "pagesmith.yaml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Pagesmith project
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Project name (defaults to directory name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Check that every page of every design builds and emits
    Validate,

    /// Print the component tree of a design
    Tree {
        /// Design name (file stem under the designs directory)
        design: String,

        /// Only print the page at this index
        #[arg(short, long)]
        page: Option<usize>,
    },

    /// Compile designs to markup and stylesheets
    Compile {
        /// Compile a specific design only
        #[arg(short, long)]
        design: Option<String>,

        /// Override the configured markup dialect
        #[arg(long)]
        dialect: Option<Dialect>,

        /// Print the output instead of writing files
        #[arg(long)]
        stdout: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Init { path, name } => {
            commands::init::run(&path, name.as_deref())?;
        }
        Commands::Validate => {
            commands::validate::run(&cli.config)?;
        }
        Commands::Tree { design, page } => {
            commands::tree::run(&cli.config, &design, page)?;
        }
        Commands::Compile {
            design,
            dialect,
            stdout,
        } => {
            commands::compile::run(&cli.config, design.as_deref(), dialect, stdout)?;
        }
    }

    Ok(())
}
