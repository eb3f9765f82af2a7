mod batch;
mod format;
mod report;
mod tui;

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cpiledger_core::{
    check_asking_price, check_original_amount, over_under_ratio, parse_amount, parse_month,
    Adjuster, InMemoryEntryRepository, LedgerConfig, LedgerError, LedgerService,
    MonthKey, PriceComparison,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::format::{comparison_label, currency, percent};

const LOG_FILE_NAME: &str = "cpiledger.log";

#[derive(Parser)]
#[command(name = "cpiledger")]
#[command(about = "Record historical sales and compare them in today's dollars", long_about = None)]
struct Cli {
    /// Config file (default: ~/.cpiledger/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the base month (YYYY-MM)
    #[arg(long, global = true)]
    base_month: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the interactive ledger
    Tui,
    /// Adjust one amount to base-month dollars (usage: adjust 1985-06 12000 --asking 30000)
    Adjust {
        month: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
        #[arg(long, allow_hyphen_values = true)]
        asking: Option<String>,
    },
    /// Load entries from a file of `MONTH AMOUNT [PRICE]` lines and print the ledger
    Batch {
        file: PathBuf,
    },
    /// Show the CPI table range and the configured bounds
    Range,
}

fn init_logging(to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if to_file { "info" } else { "warn" })
    });

    if to_file {
        // Keep log lines off the alternate screen
        let dir = LedgerConfig::default_dir()?;
        fs::create_dir_all(&dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE_NAME))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<LedgerConfig> {
    let mut config = LedgerConfig::load_or_init(cli.config.clone())?;
    if let Some(base) = &cli.base_month {
        config.base_month = MonthKey::parse(base)?;
    }
    debug!(?config, "configuration loaded");
    Ok(config)
}

fn build_ledger(config: &LedgerConfig) -> Result<LedgerService<InMemoryEntryRepository>> {
    let table = config.load_table()?;
    let ledger = LedgerService::in_memory(table, config)
        .context("Adjustments are unavailable for this session")?;
    Ok(ledger)
}

/// Text for the one-shot `adjust` command. Amounts go through the same checks as the ledger.
fn describe_adjustment(
    adjuster: &Adjuster,
    month: &MonthKey,
    amount: f64,
    asking: Option<f64>,
) -> Result<Vec<String>, LedgerError> {
    let amount = check_original_amount(amount)?;
    let adjusted = adjuster.adjust(month, amount)?;

    let mut lines = vec![format!(
        "{} in {} = {} in {} dollars",
        currency(amount),
        month,
        currency(adjusted),
        adjuster.base_month()
    )];
    if let Some(asking) = asking {
        let asking = check_asking_price(asking)?;
        let ratio = over_under_ratio(asking, adjusted);
        lines.push(format!(
            "Asking {}: {} {}",
            currency(asking),
            percent(ratio.abs()),
            comparison_label(PriceComparison::from_ratio(ratio))
        ));
    }
    Ok(lines)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    init_logging(interactive)?;

    let config = load_config(&cli)?;

    match &cli.command {
        Some(Commands::Adjust { month, amount, asking }) => {
            let month = parse_month(month)?;
            let amount = parse_amount("amount", amount)?;
            let asking = asking
                .as_deref()
                .map(|raw| parse_amount("asking price", raw))
                .transpose()?;
            let adjuster = Adjuster::new(config.load_table()?, config.base_month.clone())
                .context("Adjustments are unavailable for this session")?;

            for line in describe_adjustment(&adjuster, &month, amount, asking)? {
                println!("{}", line);
            }
        }
        Some(Commands::Batch { file }) => {
            let content = fs::read_to_string(file)
                .with_context(|| format!("Could not read {}", file.display()))?;
            let mut ledger = build_ledger(&config)?;
            let outcome = batch::load_lines(&mut ledger, &content);

            for (line, reason) in &outcome.rejected {
                eprintln!("Line {}: {}", line, reason);
            }
            println!("{}", report::render_entries(&ledger.entries()));
            println!();
            println!("{}", report::render_summary(&ledger.summarize()));
        }
        Some(Commands::Range) => {
            let ledger = build_ledger(&config)?;
            let adjuster = ledger.adjuster();
            let table = adjuster.table();
            let first = table.first_month().map(|m| m.to_string()).unwrap_or_default();
            let last = table.last_month().map(|m| m.to_string()).unwrap_or_default();

            println!("CPI table:  {} to {} ({} months published)", first, last, table.len());
            println!("Base month: {} (CPI {:.3})", adjuster.base_month(), adjuster.base_cpi());
            println!("Accepted:   {} to {}", ledger.min_month(), ledger.max_month());
        }
        Some(Commands::Tui) | None => {
            let ledger = build_ledger(&config)?;
            tui::run(ledger)?;
        }
    }
    Ok(())
}
