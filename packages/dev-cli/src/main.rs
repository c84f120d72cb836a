//! `ingest` - feed telemetry files through the ingestion pipeline from the
//! command line and print what would reach the dashboard.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ingestion::{FormatTag, IngestObserver, Ingestor, RawFile, RecordSet, ResultSink};

#[derive(Parser)]
#[command(name = "ingest", about = "Run telemetry files through the ingestion pipeline")]
struct Args {
    /// Telemetry files or archives to ingest, processed in order
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Print each delivered record set as JSON instead of a summary line
    #[arg(long)]
    json: bool,
}

/// Prints each delivery to stdout.
struct PrintSink {
    json: bool,
}

#[async_trait]
impl ResultSink for PrintSink {
    async fn deliver(
        &self,
        records: RecordSet,
        format: FormatTag,
        display_name: &str,
    ) -> ingestion::error::Result<()> {
        if self.json {
            match serde_json::to_string_pretty(&records) {
                Ok(body) => println!("{}", body),
                Err(error) => return Err(ingestion::IngestError::Sink(Box::new(error))),
            }
        } else {
            println!(
                "delivered {:<30} {:>6} records  from {}",
                format.to_string(),
                records.len(),
                display_name
            );
        }
        Ok(())
    }
}

/// Prints per-file failures to stderr as they happen.
struct ConsoleObserver;

impl IngestObserver for ConsoleObserver {
    fn error(&self, message: &str, file_name: &str) {
        eprintln!("error: {}: {}", file_name, message);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut batch = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        let content = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        batch.push(RawFile::new(name, content));
    }

    let mut ingestor = Ingestor::with_observer(PrintSink { json: args.json }, ConsoleObserver);
    let report = ingestor.ingest_batch(batch).await?;

    eprintln!(
        "{} files, {} deliveries, {} failures",
        report.files_seen,
        report.deliveries,
        report.failures.len()
    );
    if ingestor.has_pending_joins() {
        eprintln!("note: a companion-file format is still waiting for its other half");
    }

    if report.deliveries == 0 {
        std::process::exit(1);
    }
    Ok(())
}
