//! # Price Rule Loader
//!
//! Loads price rules from a JSON file into a price database.
//!
//! ## Usage
//! ```bash
//! # Load rules on top of the reference table
//! cargo run -p pricing-db --bin seed -- --file data/sample_rules.json
//!
//! # Replace everything already stored
//! cargo run -p pricing-db --bin seed -- --db ./prices.db --file rules.json --replace
//! ```
//!
//! ## File Format
//! A JSON array of rules, camelCase fields, ISO-8601 instants without offset:
//! ```json
//! [{
//!   "brandId": 1, "productId": 35455, "priceListId": 1,
//!   "validFrom": "2020-06-14T00:00:00", "validTo": "2020-12-31T23:59:59",
//!   "priority": 0, "amount": 3550, "currency": "EUR"
//! }]
//! ```
//!
//! Rules are written in file order; that order is the tie-break order for
//! equal-priority rules.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pricing_core::PriceRule;
use pricing_db::{Database, DbConfig};

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Load price rules from a JSON file into the price database")]
#[command(version)]
struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "./prices.db")]
    db: PathBuf,

    /// JSON file holding an array of price rules
    #[arg(short, long)]
    file: PathBuf,

    /// Delete existing rules (including the reference table) before loading
    #[arg(long)]
    replace: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    println!("🌱 Price Rule Loader");
    println!("====================");
    println!("Database: {}", cli.db.display());
    println!("Rules:    {}", cli.file.display());
    println!();

    let raw = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("reading {}", cli.file.display()))?;
    let rules: Vec<PriceRule> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", cli.file.display()))?;

    let db = Database::new(DbConfig::new(&cli.db))
        .await
        .context("opening price database")?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let repo = db.prices();

    if cli.replace {
        let removed = repo.delete_all().await?;
        println!("✓ Removed {} existing rules", removed);
    }

    let start = std::time::Instant::now();
    let inserted = repo
        .insert_all(&rules)
        .await
        .context("inserting price rules")?;

    println!();
    println!("✓ Loaded {} rules in {:?}", inserted, start.elapsed());
    println!("  Total stored: {}", repo.count().await?);

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
