//! osarview CLI — browse the assessment data store, compare models, and
//! export OSAR reports as PDF.

mod commands;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// osarview: security assessment reports for open source ML models
#[derive(Parser, Debug)]
#[command(name = "osarview", version, about, long_about = None)]
struct Cli {
    /// Workspace directory (looked up for `.osarview/config.toml`)
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List models published in the data store
    Models {
        /// Only show LLM models
        #[arg(long)]
        llm_only: bool,
    },
    /// List comparison-eligible models, or check one model's reports
    Probe {
        /// Model name; omitted, all eligible models are listed
        model: Option<String>,
    },
    /// Compare up to three models side by side
    Compare {
        /// Model names (1 to 3)
        #[arg(required = true, num_args = 1..)]
        models: Vec<String>,
    },
    /// Print the shaped summary of one benchmark report
    Summary {
        /// Model name
        model: String,
        /// Test key: mitre, frr, instruct, autocomplete, threat-intel
        #[arg(short, long)]
        test: String,
    },
    /// Export a model's OSAR report as a paginated PDF
    Export {
        /// Model name
        model: String,
        /// Read the OSAR JSON from a local file instead of the data store
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output directory (defaults to the configured export directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Draw the attestation checkmark next to the title
        #[arg(long)]
        attested: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = osarview_core::config::load_config(Some(&cli.workspace), None)
        .map_err(|e| anyhow::anyhow!("configuration error: {e}"))?;

    match cli.command {
        Commands::Models { llm_only } => commands::run_models(&config, llm_only).await,
        Commands::Probe { model } => commands::run_probe(&config, model.as_deref()).await,
        Commands::Compare { models } => commands::run_compare(&config, &models).await,
        Commands::Summary { model, test } => commands::run_summary(&config, &model, &test).await,
        Commands::Export {
            model,
            input,
            out,
            attested,
        } => commands::run_export(&config, &model, input.as_deref(), out.as_deref(), attested).await,
    }
}
