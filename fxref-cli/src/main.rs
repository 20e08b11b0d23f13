//! fxref CLI: fetch the daily reference-rate feed and convert amounts.
//!
//! Commands:
//! - `rates`: print the day's table, optionally re-based on another currency
//! - `convert`: convert one amount between two currencies
//! - `currencies`: list the recognized ISO 4217 codes

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use fxref_core::feed::{Config, FileFeedSource};
use fxref_core::{CurrencyCode, CurrencyConverter, CurrencyRate, ReferenceRates};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fxref",
    version,
    about = "Daily FX reference rates and currency conversion"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the reference-rate table.
    Rates {
        /// Express every rate relative to this currency.
        #[arg(long, default_value = "EUR")]
        base: String,

        /// Scale every rate by this amount of the base currency.
        #[arg(long, default_value_t = 1.0)]
        amount: f64,

        #[command(flatten)]
        feed: FeedArgs,
    },
    /// Convert an amount from one currency to another.
    Convert {
        amount: f64,
        from: String,
        to: String,

        #[command(flatten)]
        feed: FeedArgs,
    },
    /// List the recognized currency codes.
    Currencies,
}

#[derive(Args)]
struct FeedArgs {
    /// Read the feed from a local XML file instead of downloading it.
    #[arg(long, conflicts_with = "config")]
    file: Option<PathBuf>,

    /// Path to a TOML config file with a [feed] section.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Rates { base, amount, feed } => run_rates(&base, amount, &feed),
        Commands::Convert {
            amount,
            from,
            to,
            feed,
        } => run_convert(amount, &from, &to, &feed),
        Commands::Currencies => {
            for code in CurrencyCode::all() {
                println!("{code}");
            }
            Ok(())
        }
    }
}

fn build_converter(args: &FeedArgs) -> Result<CurrencyConverter> {
    if let Some(path) = &args.file {
        return Ok(CurrencyConverter::new(FileFeedSource::new(path.clone())));
    }

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    CurrencyConverter::from_config(&config.feed).context("failed to set up the feed client")
}

fn load_config(path: &Path) -> Result<Config> {
    Config::from_file(path).with_context(|| format!("failed to load config {}", path.display()))
}

fn fetch_rates(args: &FeedArgs) -> Result<ReferenceRates> {
    let converter = build_converter(args)?;
    converter
        .fetch()
        .with_context(|| format!("failed to fetch reference rates ({})", converter.source_name()))
}

fn run_rates(base: &str, amount: f64, args: &FeedArgs) -> Result<()> {
    if !CurrencyCode::is_recognized(base) {
        bail!("unknown currency code '{base}'");
    }

    let table = fetch_rates(args)?;
    let rates = table.rebased_rates(amount, base);

    if args.json {
        let out = serde_json::json!({
            "date": table.date(),
            "base": base,
            "amount": amount,
            "rates": rates,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_table(table.date(), base, amount, &rates);
    Ok(())
}

fn run_convert(amount: f64, from: &str, to: &str, args: &FeedArgs) -> Result<()> {
    let table = fetch_rates(args)?;
    let Some(converted) = table.pair_rate(amount, from, to) else {
        bail!("no rate known for {from} -> {to} on {}", table.date());
    };

    if args.json {
        let out = serde_json::json!({
            "date": table.date(),
            "from": from,
            "to": to,
            "amount": amount,
            "result": converted,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{amount} {from} = {converted:.4} {to} ({})", table.date());
    }
    Ok(())
}

fn print_table(date: &str, base: &str, amount: f64, rates: &[CurrencyRate]) {
    if rates.is_empty() {
        println!("No rates for {base} on {date}.");
        return;
    }

    println!("Reference rates for {date}: {amount} {base}");
    println!("{}", "-".repeat(24));
    for rate in rates {
        println!("{:<8} {:>15.4}", rate.currency().as_str(), rate.rate());
    }
}
