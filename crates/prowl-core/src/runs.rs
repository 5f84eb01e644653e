//! Manages completed crawl runs.
//!
//! Each run gets a fresh scheduler with its own queue and ledger, so
//! independent runs never cross-contaminate.

use std::collections::HashMap;
use std::sync::Mutex;

use prowl_engine::classify::DefectJudge;
use prowl_engine::run::{run_crawl, RunConfig, RunError};
use prowl_engine::RunReport;
use prowl_gateway::PageAnalyzer;
use tracing::info;

/// A finished run and its report.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: String,
    pub origin: String,
    pub report: RunReport,
}

/// Registry of executed runs.
pub struct RunManager {
    runs: Mutex<HashMap<String, RunRecord>>,
    next_id: Mutex<u64>,
}

impl RunManager {
    pub fn new() -> Self {
        Self {
            runs: Mutex::new(HashMap::new()),
            next_id: Mutex::new(1),
        }
    }

    /// Execute a crawl run to completion and store its report.
    pub fn execute<A, J>(
        &self,
        config: &RunConfig,
        analyzer: A,
        judge: J,
    ) -> Result<String, RunError>
    where
        A: PageAnalyzer,
        J: DefectJudge,
    {
        let report = run_crawl(config, analyzer, judge)?;

        let run_id = {
            let mut next = self.next_id.lock().unwrap();
            let id = format!("run-{:04}", *next);
            *next += 1;
            id
        };
        info!(run_id = %run_id, origin = %config.origin, "run stored");

        let record = RunRecord {
            id: run_id.clone(),
            origin: config.origin.clone(),
            report,
        };
        self.runs.lock().unwrap().insert(run_id.clone(), record);

        Ok(run_id)
    }

    /// Get a clone of a run's record.
    pub fn get_run(&self, id: &str) -> Option<RunRecord> {
        self.runs.lock().unwrap().get(id).cloned()
    }

    /// Persisted JSON form of a run's report.
    pub fn report_json(&self, id: &str) -> Option<String> {
        let record = self.get_run(id)?;
        record.report.to_json().ok()
    }

    /// Number of completed runs.
    pub fn completed_run_count(&self) -> usize {
        self.runs.lock().unwrap().len()
    }
}

impl Default for RunManager {
    fn default() -> Self {
        Self::new()
    }
}
