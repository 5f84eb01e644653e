//! Report aggregation: fold completed work and defects into the run summary
//! a report consumer depends on.

use std::collections::HashSet;

use prowl_model::ledger::RouteLedger;
use prowl_model::types::{CompletedWork, Defect};
use serde::{Deserialize, Serialize};

use crate::scheduler::StopReason;

/// Aggregate counters for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Completed-work records (items, not distinct paths).
    pub total_completed: u64,
    /// Distinct paths ever ledgered.
    pub total_discovered_routes: u64,
    pub defect_count: u64,
    /// Distinct completed paths / discovered routes, as a percentage.
    /// Exactly 0 when nothing was discovered; never above 100.
    pub coverage_percent: f64,
}

/// The externally visible result of a run. Serialized form is the report
/// contract: camelCase keys, `summary` + `completedWork` + `defects`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub summary: RunSummary,
    pub completed_work: Vec<CompletedWork>,
    pub defects: Vec<Defect>,
    pub stop_reason: StopReason,
}

impl RunReport {
    /// Persisted JSON form of the report.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Fold the scheduler's logs into a report.
pub fn aggregate(
    completed: Vec<CompletedWork>,
    defects: Vec<Defect>,
    ledger: &RouteLedger,
    stop_reason: StopReason,
) -> RunReport {
    let completed_paths: HashSet<&str> = completed.iter().map(|c| c.item.path.as_str()).collect();

    let coverage_percent = if ledger.is_empty() {
        0.0
    } else {
        (completed_paths.len() as f64 / ledger.len() as f64) * 100.0
    };

    RunReport {
        summary: RunSummary {
            total_completed: completed.len() as u64,
            total_discovered_routes: ledger.len() as u64,
            defect_count: defects.len() as u64,
            coverage_percent,
        },
        completed_work: completed,
        defects,
        stop_reason,
    }
}
