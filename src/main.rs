use std::path::PathBuf;

use anyhow::Context;
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::info;

use incident_heatmap::ingest::{self, DEFAULT_TIMESTAMP_FIELD};
use incident_heatmap::{build_report, build_weeks, summarize, CounterKind};

#[derive(Parser)]
#[command(name = "incident-heatmap")]
#[command(about = "Weekly incident heatmap and summary counters for a calendar year", long_about = None)]
struct Cli {
    /// Record field holding the incident timestamp
    #[arg(long, global = true, env = "HEATMAP_TIMESTAMP_FIELD", default_value = DEFAULT_TIMESTAMP_FIELD)]
    timestamp_field: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every week overlapping a year
    Weeks {
        #[arg(long)]
        year: i32,
    },
    /// Build the month/week heatmap as JSON
    Heatmap {
        #[arg(long)]
        input: PathBuf,
        /// Defaults to the year of --now
        #[arg(long)]
        year: Option<i32>,
        /// Reference date for the counters (YYYY-MM-DD), defaults to today
        #[arg(long, env = "HEATMAP_NOW")]
        now: Option<NaiveDate>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the total, this-month and this-year counters
    Summary {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, env = "HEATMAP_NOW")]
        now: Option<NaiveDate>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Weeks { year } => {
            let weeks = build_weeks(year)?;
            for week in &weeks {
                println!(
                    "{} ({}) {}",
                    week.label,
                    week.year,
                    week.date_range()
                );
            }
        }
        Commands::Heatmap {
            input,
            year,
            now,
            out,
        } => {
            let now = now.unwrap_or_else(|| Local::now().date_naive());
            let year = year.unwrap_or_else(|| now.year());
            let records = ingest::load_records(&input, &cli.timestamp_field)?;
            let report = build_report(&records, year, now)?;
            info!(
                year,
                counted = report.stats.counted,
                unparseable = report.stats.unparseable,
                unmatched = report.stats.unmatched,
                truncated = report.stats.truncated,
                "heatmap built"
            );

            let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Heatmap written to {}.", path.display());
                }
                None => println!("{json}"),
            }
        }
        Commands::Summary { input, now } => {
            let now = now.unwrap_or_else(|| Local::now().date_naive());
            let records = ingest::load_records(&input, &cli.timestamp_field)?;
            let counters = summarize(&records, now);

            println!("Incident counters as of {now}:");
            for kind in CounterKind::ALL {
                println!("- {}: {}", kind.label(), kind.value(&counters));
            }
        }
    }

    Ok(())
}
