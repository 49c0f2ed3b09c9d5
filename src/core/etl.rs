use crate::core::Pipeline;
use crate::utils::error::{EtlError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Fetching,
    Transforming,
    Loading,
    Done,
    Aborted,
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub endpoint: String,
    pub output_path: String,
    pub rows_extracted: usize,
    pub rows_written: usize,
    pub columns: Vec<String>,
    pub states: Vec<PipelineState>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// A failed run: the error plus the states visited before aborting.
#[derive(Debug)]
pub struct RunFailure {
    pub error: EtlError,
    pub states: Vec<PipelineState>,
}

impl From<RunFailure> for EtlError {
    fn from(failure: RunFailure) -> Self {
        failure.error
    }
}

struct StateTracker {
    states: Vec<PipelineState>,
}

impl StateTracker {
    fn new() -> Self {
        Self {
            states: vec![PipelineState::Fetching],
        }
    }

    fn current(&self) -> PipelineState {
        // states 永遠至少有初始狀態
        self.states.last().copied().unwrap_or(PipelineState::Fetching)
    }

    fn advance(&mut self, next: PipelineState) {
        debug_assert!(!self.current().is_terminal());
        tracing::debug!("State {:?} -> {:?}", self.current(), next);
        self.states.push(next);
    }

    fn abort(mut self, error: EtlError) -> RunFailure {
        tracing::error!(
            "❌ {:?} failed ({:?}): {}",
            self.current(),
            error.category(),
            error
        );
        self.advance(PipelineState::Aborted);
        RunFailure {
            error,
            states: self.states,
        }
    }
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        self.run_traced().await.map_err(EtlError::from)
    }

    /// Runs extract → transform → load once. The first failing stage ends
    /// the run; later stages are not started.
    pub async fn run_traced(&self) -> std::result::Result<RunSummary, RunFailure> {
        let started_at = Utc::now();
        let mut tracker = StateTracker::new();

        tracing::info!("🚀 Starting ETL process for {}", self.pipeline.endpoint());

        // Extract
        tracing::info!("📥 Extracting data...");
        let table = match self.pipeline.extract().await {
            Ok(table) => table,
            Err(e) => return Err(tracker.abort(e)),
        };
        let rows_extracted = table.num_rows();
        tracing::info!(
            "✅ Extracted {} records ({} columns)",
            rows_extracted,
            table.columns().len()
        );

        // Transform
        tracker.advance(PipelineState::Transforming);
        tracing::info!("🔧 Transforming data...");
        let table = match self.pipeline.transform(table).await {
            Ok(table) => table,
            Err(e) => return Err(tracker.abort(e)),
        };
        let columns = table.columns().to_vec();
        let rows_written = table.num_rows();
        tracing::info!("✅ Transformed data, columns: {}", columns.join(", "));

        // Load
        tracker.advance(PipelineState::Loading);
        tracing::info!("💾 Loading data...");
        let output_path = match self.pipeline.load(table).await {
            Ok(path) => path,
            Err(e) => return Err(tracker.abort(e)),
        };
        tracing::info!("📁 Output saved to: {}", output_path);

        tracker.advance(PipelineState::Done);
        Ok(RunSummary {
            endpoint: self.pipeline.endpoint().to_string(),
            output_path,
            rows_extracted,
            rows_written,
            columns,
            states: tracker.states,
            started_at,
            finished_at: Utc::now(),
        })
    }
}
