//! Spreadlab CLI — scripted preview fetches against the backtest backend.
//!
//! Commands:
//! - `preview` — fetch one spread backtest preview and print it as JSON
//! - `products` — list the default product catalog

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use spreadlab_core::{
    BacktestClient, ProductDescription, SimulationContext, SpreadPercentage,
};

#[derive(Parser)]
#[command(
    name = "spreadlab",
    about = "Spreadlab CLI — preview spread backtests from the shell"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a spread backtest preview and print the payload as JSON.
    Preview {
        /// Treasury address identifier (embedded in the request path as-is).
        #[arg(long)]
        address: String,

        /// Simulation start date (YYYY-MM-DD).
        #[arg(long)]
        start: String,

        /// Percentage of the treasury to swap, 0-100.
        #[arg(long, default_value = "20")]
        percentage: String,

        /// Backend origin.
        #[arg(long, default_value = BacktestClient::DEFAULT_BASE_URL)]
        backend_url: String,

        /// Print the request URL instead of fetching.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// List the default product catalog.
    Products,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Preview {
            address,
            start,
            percentage,
            backend_url,
            dry_run,
        } => cmd_preview(address, &start, &percentage, backend_url, dry_run),
        Commands::Products => cmd_products(),
    }
}

fn cmd_preview(
    address: String,
    start: &str,
    percentage: &str,
    backend_url: String,
    dry_run: bool,
) -> Result<()> {
    let start_date = NaiveDate::parse_from_str(start, "%Y-%m-%d")
        .with_context(|| format!("invalid start date {start:?} (expected YYYY-MM-DD)"))?;
    let pct: SpreadPercentage = percentage
        .parse()
        .with_context(|| format!("invalid percentage {percentage:?}"))?;

    let ctx = SimulationContext::new(address, start_date);
    let client = BacktestClient::new(backend_url);

    if dry_run {
        println!("{}", client.preview_url(&ctx, pct));
        return Ok(());
    }

    let preview = client
        .fetch_preview(&ctx, pct)
        .context("preview fetch failed")?;
    println!("{}", serde_json::to_string_pretty(&preview)?);
    Ok(())
}

fn cmd_products() -> Result<()> {
    for product in ProductDescription::default_catalog() {
        println!(
            "{} {} — {} · {} [{}]",
            product.logo,
            product.name,
            product.provider,
            product.description,
            product.tokens.join(", ")
        );
    }
    Ok(())
}
