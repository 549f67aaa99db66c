//! Valuta - money amount recognizer
//!
//! Reads text from arguments or stdin and prints the prices it finds,
//! optionally converted with a rate table.

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use std::io::BufRead;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use valuta::config::Config;
use valuta::vocabulary::Vocabulary;
use valuta::{CurrencyCode, Mode, Price, RateTable, Recognizer, RecognizerConfig};

const DEFAULT_TARGETS: [CurrencyCode; 3] = [CurrencyCode::Rub, CurrencyCode::Usd, CurrencyCode::Eur];

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text to scan; reads stdin line by line when omitted
    text: Vec<String>,

    /// Only accept currency symbols and ISO codes
    #[arg(short, long)]
    strict: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Exchange rate file (OpenExchangeRates JSON)
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Currencies to convert into
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_TARGETS)]
    to: Vec<CurrencyCode>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load()?;

    // Setup logging
    let level = if args.verbose {
        Level::DEBUG
    } else {
        config
            .log_level
            .as_deref()
            .and_then(|l| Level::from_str(l).ok())
            .unwrap_or(Level::INFO)
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    debug!("Valuta v{} starting...", env!("CARGO_PKG_VERSION"));

    config.validate()?;
    let vocabulary = Arc::new(Vocabulary::builtin()?);
    let recognizer = Recognizer::new(vocabulary, RecognizerConfig::from(&config));
    let mode = Mode::from(args.strict || config.strict_by_default);

    let rates = match args.rates.as_ref().or(config.rates_path.as_ref()) {
        Some(path) => {
            let table = RateTable::load(path)
                .with_context(|| format!("Failed to load rates from {}", path.display()))?;
            info!("Loaded exchange rates from {}", path.display());
            Some(table)
        }
        None => None,
    };

    if args.text.is_empty() {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            report(&recognizer.recognize(&line, mode), rates.as_ref(), &args);
        }
    } else {
        let text = args.text.join(" ");
        report(&recognizer.recognize(&text, mode), rates.as_ref(), &args);
    }

    Ok(())
}

fn report(prices: &[Price], rates: Option<&RateTable>, args: &Args) {
    if args.json {
        let items: Vec<serde_json::Value> = prices
            .iter()
            .map(|price| {
                let converted: serde_json::Map<String, serde_json::Value> =
                    conversions(price, rates, &args.to)
                        .into_iter()
                        .map(|(code, value)| (code.to_string(), json!(value)))
                        .collect();
                json!({
                    "amount": price.amount(),
                    "currency": price.currency(),
                    "converted": converted,
                })
            })
            .collect();
        println!("{}", serde_json::Value::Array(items));
        return;
    }

    for price in prices {
        let mut line = format!("{} {}", format_amount(price.amount()), price.currency());
        let converted: Vec<String> = conversions(price, rates, &args.to)
            .into_iter()
            .map(|(code, value)| format!("{} {}", format_amount(value), code))
            .collect();
        if !converted.is_empty() {
            line.push_str(" ≈ ");
            line.push_str(&converted.join(" | "));
        }
        println!("{}", line);
    }
}

fn conversions(
    price: &Price,
    rates: Option<&RateTable>,
    targets: &[CurrencyCode],
) -> Vec<(CurrencyCode, f64)> {
    let Some(rates) = rates else {
        return Vec::new();
    };

    targets
        .iter()
        .filter(|&&code| code != price.currency())
        .filter_map(|&code| match rates.convert_price(price, code) {
            Ok(value) => Some((code, value)),
            Err(e) => {
                warn!("Cannot convert {} to {}: {}", price, code, e);
                None
            }
        })
        .collect()
}

/// Two decimals at most, trailing zeros trimmed
fn format_amount(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
