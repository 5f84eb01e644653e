//! Core data model for the prowl crawl-and-test engine: work items,
//! page snapshots, defects, the route ledger, and the work queue.

pub mod ledger;
pub mod queue;
pub mod types;
