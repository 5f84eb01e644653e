//! The core state machine: pops work, dispatches to the analysis gateway,
//! classifies, decides retry-vs-advance, updates the route ledger, fans out
//! follow-up work, and records completions.
//!
//! Single-threaded cooperative: exactly one work item is in flight at a
//! time, and the gateway call is the only suspension point. The queue and
//! ledger are owned here and injected nowhere else.

use std::collections::{HashMap, HashSet};

use prowl_gateway::{AnalysisGateway, PageAnalyzer};
use prowl_model::ledger::RouteLedger;
use prowl_model::queue::WorkQueue;
use prowl_model::types::{now_ms, CompletedWork, Defect, DefectKind, Severity, WorkItem, WorkKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classify::{classify, DefectJudge};
use crate::followup::generate;
use crate::report::{aggregate, RunReport};

/// Knobs for one scheduler instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Maximum times one item may be analyzed before it is failed. Bounds
    /// the retry loop on persistently defective pages.
    pub max_attempts: u32,
    /// Hard cap on items processed in one run. The queue normally drains
    /// well below this; hitting it stops the run with partial results.
    pub max_items: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            max_items: 10_000,
        }
    }
}

/// Terminal state of one processed item, reported per step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Defects were found and the item was pushed back to the queue front.
    Retrying { item_id: String, attempt: u32 },
    /// The item drained cleanly and a completed-work record was appended.
    Completed { item_id: String, followups: u32 },
    /// The gateway failed or retries ran out; recorded as a defect, never
    /// requeued.
    Failed { item_id: String },
}

/// Why the run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopReason {
    /// The work queue emptied — the normal outcome.
    QueueDrained,
    /// The item cap was hit first; the report carries partial results.
    ItemBudgetExhausted,
}

/// The scheduler/orchestrator. Owns the work queue, route ledger, defect
/// log, and completed-work log for exactly one run.
pub struct Scheduler<A: PageAnalyzer, J: DefectJudge> {
    gateway: AnalysisGateway<A>,
    judge: J,
    config: SchedulerConfig,
    queue: WorkQueue,
    ledger: RouteLedger,
    defects: Vec<Defect>,
    completed: Vec<CompletedWork>,
    /// Analysis attempts per item id. Retried items are requeued unchanged;
    /// the count lives here instead of on the item.
    attempts: HashMap<String, u32>,
    /// Deterministic ids of every item ever enqueued. Suppresses duplicate
    /// capability tests, whose paths are already ledgered.
    enqueued_ids: HashSet<String>,
    items_processed: u64,
}

impl<A: PageAnalyzer, J: DefectJudge> Scheduler<A, J> {
    pub fn new(gateway: AnalysisGateway<A>, judge: J, config: SchedulerConfig) -> Self {
        Self {
            gateway,
            judge,
            config,
            queue: WorkQueue::new(),
            ledger: RouteLedger::new(),
            defects: Vec::new(),
            completed: Vec::new(),
            attempts: HashMap::new(),
            enqueued_ids: HashSet::new(),
            items_processed: 0,
        }
    }

    /// Ledger and enqueue the seed item for a run.
    pub fn seed(&mut self, path: &str) {
        let item = WorkItem::seed(path);
        info!(item_id = %item.id, path = %item.path, "seeding run");
        self.ledger.add(path);
        self.enqueued_ids.insert(item.id.clone());
        self.queue.push(item);
    }

    /// Process one item from the queue front. Returns `None` when the queue
    /// is empty.
    pub fn step(&mut self) -> Option<StepOutcome> {
        let item = self.queue.pop_front()?;
        self.items_processed += 1;

        let attempt = {
            let count = self.attempts.entry(item.id.clone()).or_insert(0);
            *count += 1;
            *count
        };
        debug!(item_id = %item.id, kind = item.kind.slug(), attempt, "dequeued");

        let snapshot = match self.gateway.analyze(&item) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(item_id = %item.id, error = %err, "analysis failed, item failed closed");
                self.defects.push(Defect::detected(
                    DefectKind::TestFailure,
                    Severity::High,
                    format!("analysis of '{}' failed: {err}", item.path),
                    &item.path,
                ));
                return Some(StepOutcome::Failed { item_id: item.id });
            }
        };

        let judgment = match self.judge.judge(&snapshot) {
            Ok(judgment) => Some(judgment),
            Err(err) => {
                // Judgment faults degrade to the deterministic rules.
                warn!(item_id = %item.id, error = %err, "judgment unavailable");
                None
            }
        };

        let found = classify(&snapshot, judgment.as_ref());
        if !found.is_empty() {
            let defect_count = found.len();
            self.defects.extend(found);

            if attempt < self.config.max_attempts {
                info!(item_id = %item.id, defect_count, attempt, "defects found, retrying at queue front");
                self.queue.push_front(item.clone());
                return Some(StepOutcome::Retrying {
                    item_id: item.id,
                    attempt,
                });
            }

            warn!(item_id = %item.id, attempt, "defects persist, retries exhausted");
            self.defects.push(Defect::detected(
                DefectKind::TestFailure,
                Severity::High,
                format!(
                    "'{}' still defective after {attempt} analysis attempts",
                    item.path
                ),
                &item.path,
            ));
            return Some(StepOutcome::Failed { item_id: item.id });
        }

        self.ledger.add(&item.path);

        let mut followups = 0u32;
        for next in generate(&snapshot, &self.ledger) {
            if !self.enqueued_ids.insert(next.id.clone()) {
                continue;
            }
            // Check-and-add: a route may only ever be enqueued for
            // discovery once.
            if next.kind == WorkKind::RouteDiscovery && !self.ledger.add(&next.path) {
                continue;
            }
            debug!(item_id = %next.id, kind = next.kind.slug(), "follow-up enqueued");
            self.queue.push(next);
            followups += 1;
        }

        info!(item_id = %item.id, path = %item.path, followups, "completed");
        self.completed.push(CompletedWork {
            item: item.clone(),
            snapshot,
            followups_enqueued: followups,
            completed_at_ms: now_ms(),
        });

        Some(StepOutcome::Completed {
            item_id: item.id,
            followups,
        })
    }

    /// Drain the queue (or hit the item cap) and report why the run stopped.
    pub fn run(&mut self) -> StopReason {
        loop {
            if self.items_processed >= self.config.max_items {
                warn!(
                    items = self.items_processed,
                    "item budget exhausted, stopping with partial results"
                );
                return StopReason::ItemBudgetExhausted;
            }
            if self.step().is_none() {
                return StopReason::QueueDrained;
            }
        }
    }

    /// Fold the run's logs into the final report.
    pub fn into_report(self, stop_reason: StopReason) -> RunReport {
        aggregate(self.completed, self.defects, &self.ledger, stop_reason)
    }

    pub fn defects(&self) -> &[Defect] {
        &self.defects
    }

    pub fn completed(&self) -> &[CompletedWork] {
        &self.completed
    }

    pub fn ledger(&self) -> &RouteLedger {
        &self.ledger
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
