//! revenue-split command-line entry point.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI args ──▶ config (TOML + env) ──▶ Application::bootstrap
//!                                              │
//!              ┌───────────────────────────────┼──────────────────────────┐
//!              ▼                               ▼                          ▼
//!       WalletRegistry                 RevenueConverter             RevenueLedger
//!     (one address/chain)       (RateSource: coinbase | static)   (50/50 balances)
//!                                              │
//!                                              ▼
//!                                   exchange-rate endpoint
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use revenue_split::config::load_or_default;
use revenue_split::lifecycle::{AppError, Application};
use revenue_split::observability::{logging, metrics};
use revenue_split::revenue::split_revenue;

#[derive(Parser)]
#[command(name = "revenue-split")]
#[command(about = "Split revenue between wallets and convert it to crypto units", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a revenue total 50/50 between the Solana and Ethereum wallets
    Split { total: f64 },
    /// Convert an amount in the source currency into one or more crypto currencies
    Convert {
        amount: f64,
        #[arg(required = true)]
        currencies: Vec<String>,
    },
    /// Show configured wallet addresses, or the address for one chain
    Wallets {
        /// Chain name or ticker (solana, SOL, ethereum, ETH)
        chain: Option<String>,
    },
    /// Record payments in a fresh ledger and show the resulting balances
    Record {
        #[arg(short, long, default_value = "manual")]
        source: String,
        #[arg(short, long, default_value = "revenue")]
        kind: String,
        #[arg(required = true)]
        amounts: Vec<f64>,
    },
    /// Run the example flow: convert revenue to SOL and ETH, then split it
    Example {
        #[arg(short, long, default_value_t = 1000.0)]
        revenue: f64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_or_default(cli.config.as_deref())?;
    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level)
        .to_string();
    logging::init_logging(&level)?;

    tracing::info!(
        provider = ?config.rates.provider,
        source_currency = %config.rates.source_currency,
        retries_enabled = config.retries.enabled,
        "Configuration loaded"
    );

    let mut app = Application::bootstrap(config)?;

    let observability = &app.config().observability;
    if observability.metrics_enabled {
        if let Ok(addr) = observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let outcome = run(&mut app, cli.command).await;
    app.shutdown();
    outcome?;
    Ok(())
}

async fn run(app: &mut Application, command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Split { total } => print_json(&split_revenue(total)?),
        Commands::Convert { amount, currencies } => {
            let codes: Vec<&str> = currencies.iter().map(String::as_str).collect();
            let mut conversions = Vec::with_capacity(codes.len());
            for (_, result) in app.converter().convert_many(amount, &codes).await {
                conversions.push(result?);
            }
            print_json(&conversions);
        }
        Commands::Wallets { chain: None } => print_json(&app.registry().addresses()),
        Commands::Wallets { chain: Some(chain) } => print_json(&app.wallet(&chain)?),
        Commands::Record {
            source,
            kind,
            amounts,
        } => {
            let count = amounts.len();
            for amount in amounts {
                app.ledger_mut().record(amount, &source, &kind)?;
            }
            print_json(&serde_json::json!({
                "entries": app.ledger().recent(count),
                "balances": app.ledger().balances(),
            }));
        }
        Commands::Example { revenue } => print_json(&app.run_example(revenue).await?),
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "Failed to serialize output"),
    }
}
