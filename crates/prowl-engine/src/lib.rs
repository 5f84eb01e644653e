//! The scheduling engine: defect classification, follow-up generation, the
//! work-queue state machine, and report aggregation.

pub mod classify;
pub mod followup;
pub mod report;
pub mod run;
pub mod scheduler;

pub use classify::{classify, DefectJudge, JudgeError, Judgment, NoopJudge};
pub use followup::generate;
pub use report::{RunReport, RunSummary};
pub use run::{run_crawl, RunConfig, RunError};
pub use scheduler::{Scheduler, SchedulerConfig, StepOutcome, StopReason};
