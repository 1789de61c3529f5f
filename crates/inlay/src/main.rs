//! Inlay CLI - schema-driven prop configurator for component docs.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "inlay")]
#[command(about = "Schema-driven prop configurator and example-code synthesizer")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to inlay.toml config file
    #[arg(short, long, default_value = "inlay.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List all known components
    List,

    /// Show a component's resolved attributes and controls
    Inspect {
        /// Component name
        component: String,
    },

    /// Synthesize the example snippet for a configuration
    Synth {
        /// Component name
        component: String,

        /// Attribute values, as name=value pairs
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,

        /// Content slot value
        #[arg(long)]
        content: Option<String>,

        /// Use the grouped-rendering template
        #[arg(long)]
        grouped: bool,
    },

    /// Start the configurator dev server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "7878")]
        port: u16,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let config = config::load(&cli.config)?;

    match cli.command {
        Commands::List => {
            commands::list::run(&config)?;
        }
        Commands::Inspect { component } => {
            commands::inspect::run(&config, &component)?;
        }
        Commands::Synth {
            component,
            set,
            content,
            grouped,
        } => {
            commands::synth::run(&config, &component, &set, content, grouped)?;
        }
        Commands::Serve { port, no_open } => {
            commands::serve::run(&config, port, !no_open).await?;
        }
    }

    Ok(())
}
