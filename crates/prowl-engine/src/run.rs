//! Run entry point: wire the gateway, judge, and scheduler together, drain
//! the queue, and aggregate the report.

use prowl_gateway::{AnalysisGateway, PageAnalyzer, SetupError};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classify::DefectJudge;
use crate::report::RunReport;
use crate::scheduler::{Scheduler, SchedulerConfig};

/// Configuration for one crawl-and-test run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    /// Base origin of the target application, e.g. `http://localhost:3000`.
    pub origin: String,
    /// Seed path for the run.
    pub seed_path: String,
    pub scheduler: SchedulerConfig,
}

impl RunConfig {
    pub fn new(origin: &str) -> Self {
        Self {
            origin: origin.to_string(),
            seed_path: "/".to_string(),
            scheduler: SchedulerConfig::default(),
        }
    }
}

/// A run could not start. Failures after the loop begins never surface
/// here; they degrade to defects inside the report.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Setup(#[from] SetupError),
}

/// Run a full crawl against `config.origin`, starting from the seed path,
/// until the work queue drains or the item budget is hit.
pub fn run_crawl<A, J>(config: &RunConfig, analyzer: A, judge: J) -> Result<RunReport, RunError>
where
    A: PageAnalyzer,
    J: DefectJudge,
{
    let gateway = AnalysisGateway::new(&config.origin, analyzer)?;
    info!(origin = %config.origin, seed = %config.seed_path, "crawl run starting");

    let mut scheduler = Scheduler::new(gateway, judge, config.scheduler.clone());
    scheduler.seed(&config.seed_path);
    let stop_reason = scheduler.run();

    let report = scheduler.into_report(stop_reason);
    info!(
        completed = report.summary.total_completed,
        routes = report.summary.total_discovered_routes,
        defects = report.summary.defect_count,
        coverage = report.summary.coverage_percent,
        "crawl run finished"
    );
    Ok(report)
}
