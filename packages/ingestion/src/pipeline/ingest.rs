//! Batch orchestration: expand archives, detect formats, dispatch to
//! parsers, route joined formats, and report progress.
//!
//! Processing is strictly sequential: one file (or archive member) at a
//! time, in the order supplied. Failures are local to the file that caused
//! them; the batch always runs to completion.

use tracing::{debug, info, warn};

use crate::archive::expand_archive;
use crate::detect::{detect, FormatTag};
use crate::error::{IngestError, Result};
use crate::joiner::{JoinState, WorkflowPair};
use crate::parsers::{cdn, error_summary, patterns, table, trace};
use crate::traits::observer::{IngestObserver, NoopObserver};
use crate::traits::sink::ResultSink;
use crate::types::file::RawFile;
use crate::types::record_set::RecordSet;

/// Outcome of one batch.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Files processed, counting archive members as they are discovered
    pub files_seen: usize,

    /// Record sets handed to the sink
    pub deliveries: usize,

    /// Per-file failures, in encounter order
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every file processed cleanly.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One failed file and the reason it was skipped.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub file_name: String,
    pub message: String,
}

/// The ingestion orchestrator.
///
/// Owns the session's join state; create one per ingestion session and
/// feed it batches. [`Ingestor::clear`] resets the join state when the
/// session's loaded data is discarded.
pub struct Ingestor<S, O = NoopObserver> {
    sink: S,
    observer: O,
    joins: JoinState,
}

impl<S: ResultSink> Ingestor<S> {
    /// Create an orchestrator that reports progress nowhere.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            observer: NoopObserver,
            joins: JoinState::new(),
        }
    }
}

impl<S: ResultSink, O: IngestObserver> Ingestor<S, O> {
    /// Create an orchestrator with a progress observer.
    pub fn with_observer(sink: S, observer: O) -> Self {
        Self {
            sink,
            observer,
            joins: JoinState::new(),
        }
    }

    /// The sink deliveries go to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Whether a join half is still waiting for its companion file.
    pub fn has_pending_joins(&self) -> bool {
        self.joins.has_pending()
    }

    /// Reset the session's join state.
    pub fn clear(&mut self) {
        self.joins.clear();
    }

    /// Process a batch of files in the order supplied.
    ///
    /// An empty batch is the one aggregate failure; everything else is
    /// reported per file through the observer and collected into the
    /// returned [`BatchReport`].
    pub async fn ingest_batch(&mut self, files: Vec<RawFile>) -> Result<BatchReport> {
        if files.is_empty() {
            self.observer
                .error(&IngestError::EmptyBatch.to_string(), "batch");
            return Err(IngestError::EmptyBatch);
        }

        let mut report = BatchReport::new();

        for file in files {
            report.files_seen += 1;
            self.observer.status(&file.name, "Starting...", 0);

            if file.content.is_empty() {
                self.fail(&mut report, &file.name, IngestError::EmptyFile);
                self.observer.remove_status(&file.name);
                continue;
            }

            if file.is_archive() {
                self.process_archive(&file, &mut report).await;
            } else {
                self.observer.status(&file.name, "Reading file...", 25);
                let text = file.text();
                if text.trim().is_empty() {
                    self.fail(&mut report, &file.name, IngestError::EmptyFile);
                } else {
                    self.process_content(&text, &file.name, &mut report).await;
                }
            }

            self.observer.remove_status(&file.name);
        }

        self.observer.batch_complete();
        info!(
            "batch complete: {} files, {} deliveries, {} failures",
            report.files_seen,
            report.deliveries,
            report.failures.len()
        );
        Ok(report)
    }

    /// Expand an archive and process each qualifying member as a
    /// standalone file with its own progress entry.
    async fn process_archive(&mut self, file: &RawFile, report: &mut BatchReport) {
        self.observer.status(&file.name, "Extracting archive...", 20);

        let members = match expand_archive(&file.content) {
            Ok(members) => members,
            Err(error) => {
                self.fail(report, &file.name, error);
                return;
            }
        };

        if members.is_empty() {
            self.fail(report, &file.name, IngestError::EmptyArchive);
            return;
        }

        info!("expanded {} members from {}", members.len(), file.name);

        for member in members {
            report.files_seen += 1;
            self.observer.status(&member.name, "Extracting file...", 50);

            let text = member.text();
            if text.trim().is_empty() {
                self.fail(report, &member.name, IngestError::EmptyFile);
            } else {
                self.observer.status(&member.name, "Processing...", 75);
                self.process_content(&text, &member.name, report).await;
            }

            self.observer.remove_status(&member.name);
        }
    }

    /// Detect a file's format and run the matching parser.
    async fn process_content(&mut self, content: &str, file_name: &str, report: &mut BatchReport) {
        self.observer.status(file_name, "Detecting file type...", 25);

        let Some(tag) = detect(file_name) else {
            self.fail(report, file_name, IngestError::UnrecognizedFormat);
            return;
        };

        info!("detected {} as {}", file_name, tag);
        self.observer
            .status(file_name, &format!("Detected as {}", tag.display_name()), 50);
        self.observer.status(
            file_name,
            &format!("Processing as {}...", tag.display_name()),
            75,
        );

        if let Err(error) = self.parse_and_route(tag, content, file_name, report).await {
            self.fail(report, file_name, error);
        }
    }

    /// Parse content under its tag and either deliver directly or feed the
    /// joiner.
    async fn parse_and_route(
        &mut self,
        tag: FormatTag,
        content: &str,
        file_name: &str,
        report: &mut BatchReport,
    ) -> Result<()> {
        match tag {
            FormatTag::LoadBalancerSummary => {
                let rows = table::parse_load_balancer_summary(content)?;
                self.deliver(RecordSet::LoadBalancerSummary(rows), file_name, report)
                    .await;
            }
            FormatTag::LoadBalancerPerformance => {
                let rows = table::parse_performance(content)?;
                self.deliver(RecordSet::LoadBalancerPerformance(rows), file_name, report)
                    .await;
            }
            FormatTag::SlowQuery => {
                let rows = table::parse_slow_queries(content)?;
                self.deliver(RecordSet::SlowQueries(rows), file_name, report)
                    .await;
            }
            FormatTag::ErrorSummary => {
                let rows = error_summary::parse_error_summary(content);
                self.deliver(RecordSet::ErrorSummary(rows), file_name, report)
                    .await;
            }
            FormatTag::LoadTestMetric => {
                let rows = table::parse_load_test(content)?;
                self.deliver(RecordSet::LoadTestMetrics(rows), file_name, report)
                    .await;
            }
            FormatTag::CdnCacheStats => {
                let rows = cdn::parse_cache_statistics(content)?;
                self.deliver(RecordSet::CdnCacheStats(rows), file_name, report)
                    .await;
            }
            FormatTag::CdnPopularObjects => {
                let rows = cdn::parse_popular_objects(content)?;
                self.deliver(RecordSet::CdnPopularObjects(rows), file_name, report)
                    .await;
            }
            FormatTag::CdnMetricSeries => {
                let series = cdn::parse_metric_series(content)?;
                self.deliver(RecordSet::CdnMetricSeries(series), file_name, report)
                    .await;
            }
            FormatTag::LogPattern => {
                let rows = patterns::parse_patterns(content)?;
                self.deliver(RecordSet::LogPatterns(rows), file_name, report)
                    .await;
            }
            FormatTag::TraceMetricQuery => {
                let queries = trace::parse_metric_query(content)?;
                match self.joins.offer_metric_query(queries, file_name) {
                    Some((bundle, display_name)) => {
                        self.deliver(RecordSet::TraceMetrics(bundle), &display_name, report)
                            .await;
                    }
                    None => debug!("stored metric query half from {}", file_name),
                }
            }
            FormatTag::TraceMetricResult => {
                let results = trace::parse_metric_result(content)?;
                match self.joins.offer_metric_result(results, file_name) {
                    Some((bundle, display_name)) => {
                        self.deliver(RecordSet::TraceMetrics(bundle), &display_name, report)
                            .await;
                    }
                    None => debug!("stored metric result half from {}", file_name),
                }
            }
            FormatTag::TraceWorkflow => {
                let workflows = trace::parse_workflows(content)?;
                match self.joins.offer_workflows(workflows, file_name) {
                    Some(pair) => self.deliver_workflow_pair(pair, report).await,
                    None => debug!("stored workflow half from {}", file_name),
                }
            }
            FormatTag::TraceMetricMap => {
                let metrics = trace::parse_metric_map(content)?;
                match self.joins.offer_metric_map(metrics, file_name) {
                    Some(pair) => self.deliver_workflow_pair(pair, report).await,
                    None => debug!("stored metric map half from {}", file_name),
                }
            }
        }

        Ok(())
    }

    /// Deliver both halves of a completed workflow join, each under its
    /// own file name.
    async fn deliver_workflow_pair(&self, pair: WorkflowPair, report: &mut BatchReport) {
        let WorkflowPair { workflows, metrics } = pair;
        self.deliver(
            RecordSet::TraceWorkflows(workflows.payload),
            &workflows.file_name,
            report,
        )
        .await;
        self.deliver(
            RecordSet::TraceMetricMap(metrics.payload),
            &metrics.file_name,
            report,
        )
        .await;
    }

    /// Hand one record set to the sink.
    async fn deliver(&self, records: RecordSet, display_name: &str, report: &mut BatchReport) {
        let tag = records.format_tag();
        info!(
            "delivering {} records from {} as {}",
            records.len(),
            display_name,
            tag
        );

        match self.sink.deliver(records, tag, display_name).await {
            Ok(()) => report.deliveries += 1,
            Err(error) => {
                warn!("sink rejected {}: {}", display_name, error);
                self.observer.error(&error.to_string(), display_name);
                report.failures.push(FileFailure {
                    file_name: display_name.to_string(),
                    message: error.to_string(),
                });
            }
        }
    }

    /// Record one per-file failure and tell the observer.
    fn fail(&self, report: &mut BatchReport, file_name: &str, error: IngestError) {
        warn!("skipping {}: {}", file_name, error);
        self.observer.error(&error.to_string(), file_name);
        report.failures.push(FileFailure {
            file_name: file_name.to_string(),
            message: error.to_string(),
        });
    }
}
