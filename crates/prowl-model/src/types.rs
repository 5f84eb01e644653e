//! Work items, page snapshots, defects, and completed-work records.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// The checks every page-visit item requests from the analysis collaborator.
pub const STANDARD_TEST_CASES: [&str; 5] = [
    "page-load",
    "screenshot-capture",
    "element-discovery",
    "form-testing",
    "interaction-testing",
];

/// What a work item is for. Closed set — the follow-up generator matches
/// exhaustively, so adding a kind is a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkKind {
    /// The seed item for the run's entry path.
    Initial,
    /// Visit a path discovered via a link on another page.
    RouteDiscovery,
    /// Exercise the forms found on an already-visited path.
    FormTesting,
    /// Exercise the interactive elements found on an already-visited path.
    InteractionTesting,
    /// Exercise the API traffic observed on an already-visited path.
    ApiTesting,
}

impl WorkKind {
    /// Stable slug used in deterministic work-item ids and logs.
    pub fn slug(&self) -> &'static str {
        match self {
            WorkKind::Initial => "initial",
            WorkKind::RouteDiscovery => "route-discovery",
            WorkKind::FormTesting => "form-testing",
            WorkKind::InteractionTesting => "interaction-testing",
            WorkKind::ApiTesting => "api-testing",
        }
    }
}

/// One unit of scheduled work: visit a path and run the requested checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    /// Unique within a run; stable across retries so re-logging after a
    /// retry refers to the same item.
    pub id: String,
    /// Origin-relative logical route to visit.
    pub path: String,
    pub kind: WorkKind,
    /// Advisory only — the queue is strictly FIFO. 1 = highest.
    pub priority: u8,
    /// Named checks passed through to the gateway, not interpreted here.
    pub test_cases: Vec<String>,
}

impl WorkItem {
    /// Deterministic id for follow-up items: re-generating the same
    /// follow-up (e.g. after a retried analysis of the same page) yields
    /// the same identity.
    pub fn derived_id(kind: WorkKind, path: &str) -> String {
        format!("{}:{}", kind.slug(), path)
    }

    /// Build a follow-up item with the deterministic id for its path+kind.
    pub fn follow_up(kind: WorkKind, path: &str, priority: u8, test_cases: Vec<String>) -> Self {
        Self {
            id: Self::derived_id(kind, path),
            path: path.to_string(),
            kind,
            priority,
            test_cases,
        }
    }

    /// Build the seed item for a run.
    pub fn seed(path: &str) -> Self {
        Self {
            id: Self::derived_id(WorkKind::Initial, path),
            path: path.to_string(),
            kind: WorkKind::Initial,
            priority: 1,
            test_cases: STANDARD_TEST_CASES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Normalized result of analyzing one work item. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub work_item_id: String,
    pub path: String,
    /// Origin-relative paths discovered via links, deduplicated,
    /// first-seen order preserved.
    pub outbound_paths: Vec<String>,
    pub has_form: bool,
    pub has_interactive_element: bool,
    pub has_api_traffic: bool,
    /// Page-load duration in milliseconds.
    pub timing_ms: u64,
    /// Error descriptions surfaced during load/interaction.
    pub runtime_errors: Vec<String>,
    /// Opaque handles (screenshot references etc.), never interpreted here.
    pub captured_artifacts: Vec<String>,
}

/// Category of a detected problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefectKind {
    RuntimeError,
    ApiError,
    Performance,
    /// The work item itself could not be executed (gateway failure or
    /// retries exhausted).
    TestFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Remediation lifecycle. The engine only ever writes `Detected`; the other
/// states are the hook for external remediation collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefectStatus {
    Detected,
    FixAttempted,
    FixFailed,
    Fixed,
}

/// A detected problem on a path. Appended to the run's defect log and never
/// deleted; only `status` may change, and only from outside the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Defect {
    pub kind: DefectKind,
    pub severity: Severity,
    pub description: String,
    pub path: String,
    pub status: DefectStatus,
}

impl Defect {
    /// A freshly detected defect.
    pub fn detected(kind: DefectKind, severity: Severity, description: String, path: &str) -> Self {
        Self {
            kind,
            severity,
            description,
            path: path.to_string(),
            status: DefectStatus::Detected,
        }
    }
}

/// A work item that drained cleanly: the item, what the analysis saw, and
/// what it fanned out. Immutable; consumed by the report aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedWork {
    pub item: WorkItem,
    pub snapshot: PageSnapshot,
    /// Follow-up items actually enqueued from this snapshot (after ledger
    /// and duplicate-id suppression).
    pub followups_enqueued: u32,
    /// Completion wall-clock timestamp, milliseconds since the epoch.
    pub completed_at_ms: u64,
}

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
