mod engine;
mod loader;
mod models;
mod types;

use std::collections::BTreeSet;
use std::fmt::Display;
use std::io::{stderr, stdout, Write};
use std::process::exit;
use std::time::Instant;

use anyhow::Result;
use csv::{Writer, WriterBuilder};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::QueryEngine;
use crate::loader::{DatasetLoader, LoadError};

const DEFAULT_DATASET: &str = "transactions.json";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().skip(1).any(|arg| arg == "-h" || arg == "--help") {
        eprintln!("Usage: transaction-query-engine [dataset].json|.csv [log_level:optional] > [report].csv");
        eprintln!("Default dataset: {DEFAULT_DATASET}");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        return Ok(());
    }

    let path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_DATASET);
    let log_level = args.get(2)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let timer = Instant::now();
    let transactions = match DatasetLoader::new(path).load().await {
        Ok(transactions) => transactions,
        Err(error) => {
            match &error {
                LoadError::Io { .. } => eprintln!("Dataset could not be opened, check the path: {error}"),
                LoadError::Json { .. } | LoadError::Csv { .. } => eprintln!("Dataset is malformed, nothing was loaded: {error}"),
                LoadError::Interrupted { .. } => eprintln!("Dataset loading did not complete: {error}")
            }
            exit(1);
        }
    };
    info!("Loaded dataset in: {:?}", timer.elapsed());

    let engine = QueryEngine::new(transactions);

    if engine.is_empty() {
        warn!("Dataset [{path}] contains no transactions");
    }

    write_report_to_stdout(&engine)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: The report goes to stdout, logging stays on stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_report_to_stdout(engine: &QueryEngine) -> Result<()> {
    //NOTE: Rows have different widths, every field is quoted by the writer when it needs to be
    let mut output = WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout().lock());

    write_row(&mut output, "records", &[&engine.len()])?;
    write_row(&mut output, "total_amount", &[&engine.total_amount()?])?;
    write_row(&mut output, "max_amount", &[&display_or_none(engine.max_amount())])?;
    write_row(&mut output, "unique_clients", &[&engine.count_unique_clients()])?;
    write_row(&mut output, "unique_senders", &[&engine.count_unique_senders()])?;
    write_row(&mut output, "top_sender_by_frequency", &[&display_or_none(engine.top_sender_by_frequency())])?;
    write_row(&mut output, "top_sender_by_total_amount", &[&display_or_none(engine.top_sender_by_total_amount()?)])?;

    let unsolved: Vec<String> = engine.unsolved_issue_ids().iter().map(ToString::to_string).collect();
    write_row(&mut output, "unsolved_issue_ids", &[&unsolved.join(";")])?;

    for message in engine.solved_issue_messages() {
        write_row(&mut output, "solved_issue_message", &[&message])?;
    }

    for transaction in engine.top3_by_amount() {
        write_row(&mut output, "top_transaction", &[
            &transaction.transaction_number(),
            &transaction.amount(),
            &transaction.sender_full_name(),
            &transaction.beneficiary_full_name(),
            &transaction.beneficiary_age()
        ])?;
    }

    let latest_by_beneficiary = engine.transactions_by_beneficiary();

    for (beneficiary, transactions) in engine.transactions_grouped_by_beneficiary() {
        let latest = latest_by_beneficiary.get(beneficiary).map(|transaction| transaction.transaction_number());
        write_row(&mut output, "beneficiary", &[&beneficiary, &transactions.len(), &display_or_none(latest)])?;
    }

    let clients: BTreeSet<&str> = engine.transactions().iter()
        .flat_map(|transaction| [transaction.sender_full_name(), transaction.beneficiary_full_name()])
        .filter(|client| !client.is_empty())
        .collect();

    for client in clients {
        write_row(&mut output, "client", &[
            &client,
            &engine.total_amount_sent_by(client)?,
            &engine.has_open_compliance_issue(client)?
        ])?;
    }

    output.flush()?;

    Ok(())
}

fn write_row<W: Write>(output: &mut Writer<W>, key: &str, values: &[&dyn Display]) -> Result<()> {
    output.write_field(key)?;

    for value in values {
        output.write_field(value.to_string())?;
    }

    output.write_record(None::<&[u8]>)?;

    Ok(())
}

fn display_or_none<T: ToString>(value: Option<T>) -> String {
    value.map(|value| value.to_string()).unwrap_or_else(|| "none".to_string())
}
