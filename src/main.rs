use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "run_ggoutlier")]
#[command(about = "QAX plugin adapter for the GGOutlier bathymetry QC tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the smoke test: forward --help to the GGOutlier executable
    Smoke,
    /// Print the plugin's check references as JSON
    Checks,
    /// Run the plugin's checks over a QAJSON document
    Run {
        /// QAJSON document to process
        #[arg(long)]
        qajson: PathBuf,
        /// Write the updated document here instead of in place
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("qax-ggoutlier {}", env!("CARGO_PKG_VERSION"));
        }
        // the smoke test is the default action, as a bare `run_ggoutlier`
        // is how an install is usually verified
        Some(Commands::Smoke) | None => {
            cli::cmd_smoke().await?;
        }
        Some(Commands::Checks) => {
            cli::cmd_checks()?;
        }
        Some(Commands::Run { qajson, output }) => {
            cli::cmd_run(qajson, output).await?;
        }
    }

    Ok(())
}
