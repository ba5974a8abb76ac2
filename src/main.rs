//! CLI entry point for the sales dashboard prep tool.
//!
//! Provides subcommands for building the full dashboard table set, exporting
//! cleaned records, and printing headline KPIs.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use sales_dashboard_prep::aggregate::kpi::summarize;
use sales_dashboard_prep::aggregate::report::build_report;
use sales_dashboard_prep::clean::clean_rows;
use sales_dashboard_prep::output::{print_json, write_table};
use sales_dashboard_prep::parser::read_records;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "sales_dashboard_prep")]
#[command(about = "Prepares raw store sales exports for the spreadsheet dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write every dashboard table
    Report {
        /// Path to the raw sales export (.csv or .csv.gz)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory to write aggregate tables and summary.json to
        #[arg(short, long, default_value = "dashboard")]
        output_dir: PathBuf,
    },
    /// Clean the raw export and write the validated rows as CSV
    Clean {
        /// Path to the raw sales export (.csv or .csv.gz)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// CSV file to write cleaned records to
        #[arg(short, long, default_value = "cleaned.csv")]
        output: PathBuf,
    },
    /// Print headline KPIs for a raw export as JSON
    Kpis {
        /// Path to the raw sales export (.csv or .csv.gz)
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/sales_dashboard_prep.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("sales_dashboard_prep.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report { input, output_dir } => {
            build_report(&input, &output_dir)?;
        }
        Commands::Clean { input, output } => {
            let rows = read_records(&input)?;
            let (records, report) = clean_rows(rows);
            write_table(&output, &records)?;

            info!(
                rows_kept = report.rows_kept,
                rows_skipped = report.rows_skipped(),
                output = %output.display(),
                "Cleaned records written"
            );
        }
        Commands::Kpis { input } => {
            let rows = read_records(&input)?;
            let (records, report) = clean_rows(rows);
            print_json(&summarize(&records, report))?;
        }
    }

    Ok(())
}
