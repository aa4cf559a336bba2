//! docnav CLI - navigation and sidebar configuration for documentation sites.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "docnav")]
#[command(about = "Navigation and sidebar configuration for documentation sites")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to docs.toml config file
    #[arg(short, long, global = true, default_value = "docs.toml")]
    config: PathBuf,

    /// Profile to apply over the base configuration
    #[arg(short, long, global = true)]
    profile: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter docs.toml and sample pages
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Validate the configuration and report warnings
    Check {
        /// Fail if any warning is reported
        #[arg(long)]
        deny_warnings: bool,
    },

    /// Write the resolved configuration as JSON
    Export {
        /// Output file (defaults to [export] output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show the sidebar groups shown on a page
    Resolve {
        /// Page path, e.g. /knowledge/rust
        path: String,
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

    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Check { deny_warnings } => {
            commands::check::run(&cli.config, profile, deny_warnings).await?;
        }
        Commands::Export { output, compact } => {
            let pretty = if compact { Some(false) } else { None };
            commands::export::run(&cli.config, profile, output, pretty).await?;
        }
        Commands::Resolve { path } => {
            commands::resolve::run(&cli.config, profile, &path).await?;
        }
    }

    Ok(())
}
