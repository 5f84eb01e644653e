//! Run management surface: execute crawl runs by id and keep their reports.

pub mod runs;

pub use runs::{RunManager, RunRecord};
