// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use policy_probe::utils::display;
use policy_probe::{Config, ReportExporter, Verifier, adhoc_query};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "policy_probe")]
#[command(version = "0.1.0")]
#[command(about = "Retrieval sanity checker for a LanceDB policy-document store", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify the store: connectivity, count, samples, fixed test queries
    Verify {
        /// Also write the report as JSON to this path
        #[arg(long, value_name = "PATH")]
        json_out: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,
    },

    /// Ask one ad-hoc question and print full, untruncated matches
    Query {
        /// Question text (passed to the store as-is)
        query: String,

        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.color {
        colored::control::set_override(false);
    }
    policy_probe::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Policy store probe");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    // bare invocation runs the verification routine
    match cli.command.unwrap_or(Commands::Verify {
        json_out: None,
        pretty: false,
    }) {
        Commands::Verify { json_out, pretty } => {
            cmd_verify(&config, json_out, pretty).await?;
        }
        Commands::Query { query, limit } => {
            cmd_query(&config, &query, limit).await?;
        }
    }

    Ok(())
}

/// Verification never fails the process: every outcome is rendered and
/// the command exits 0.
async fn cmd_verify(config: &Config, json_out: Option<PathBuf>, pretty: bool) -> Result<()> {
    let report = Verifier::new(config.clone()).run().await;

    println!("{}", report.render(&config.verify));

    if let Some(path) = json_out {
        ReportExporter::new(path)
            .write(&report, pretty)
            .context("Failed to write JSON report")?;
    }

    Ok(())
}

/// Ad-hoc queries have no recovery: any store or embedding failure
/// propagates and the process exits nonzero.
async fn cmd_query(config: &Config, query: &str, limit: usize) -> Result<()> {
    info!("Ad-hoc query: {}", query);

    let matches = adhoc_query(config, query, limit)
        .await
        .context("Ad-hoc query failed")?;

    println!("\nQuery: {}", query);
    println!("{}", display::rule());

    if matches.is_empty() {
        println!("\nNo results returned.");
        println!("Try different search terms, or check that documents were ingested.");
        return Ok(());
    }

    for (i, hit) in matches.iter().enumerate() {
        println!("\nResult {}:", i + 1);
        println!("{}", hit.content);
        println!("Source: {}", hit.source_label());

        if let Some(distance) = hit.distance {
            println!("Distance: {:.4}", distance);
        }

        println!("{}", display::thin_rule());
    }

    Ok(())
}
