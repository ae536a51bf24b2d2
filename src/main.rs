use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sales_insights::{loader, logging, Config, DataSource, MonthOfYear, ReportComposer, TransactionStore};

/// Month-scoped sales analytics from the command line
#[derive(Parser)]
#[command(name = "sales-insights", version, about)]
struct Cli {
    /// URL or file (.json / .csv) to load; overrides SALES_DATA_SOURCE
    #[arg(long, global = true)]
    source: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the combined report for one month as JSON
    Report {
        /// Month of year, 1 (January) to 12 (December)
        #[arg(long)]
        month: String,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print headline numbers for every month
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to read configuration")?;
    if let Some(source) = &cli.source {
        config.data_source = DataSource::parse(source);
    }

    // Validate the month before doing any network work
    let month = match &cli.command {
        Command::Report { month, .. } => Some(month.parse::<MonthOfYear>()?),
        Command::Summary => None,
    };

    let store = TransactionStore::new();
    loader::load_into(&store, &config.data_source, config.fetch_timeout)
        .await
        .with_context(|| format!("Failed to load transactions from {}", config.data_source))?;

    let composer = ReportComposer::new(&store);

    match (cli.command, month) {
        (Command::Report { pretty, .. }, Some(month)) => {
            let report = composer.compose(month)?;
            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{}", json);
        }
        _ => run_summary(&composer)?,
    }

    Ok(())
}

fn run_summary(composer: &ReportComposer<'_>) -> Result<()> {
    println!("📊 Sales by month (all years)");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{:<10} {:>8} {:>14} {:>8} {:>10}", "Month", "Records", "Sale amount", "Sold", "Not sold");

    for summary in composer.yearly_overview()? {
        println!(
            "{:<10} {:>8} {:>14.2} {:>8} {:>10}",
            summary.month.name(),
            summary.records,
            summary.total_sale_amount,
            summary.total_sold_items,
            summary.total_not_sold_items,
        );
    }

    Ok(())
}
