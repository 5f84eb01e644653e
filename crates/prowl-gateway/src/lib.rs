//! Page-analysis collaborator seam: the `PageAnalyzer` trait, the raw
//! snapshot shape the collaborator returns, href normalization, and the
//! `AnalysisGateway` adapter that turns raw responses into the engine's
//! normalized `PageSnapshot`.

pub mod analyzer;
pub mod gateway;
pub mod normalize;

pub use analyzer::{AnalysisError, PageAnalyzer, RawPageSnapshot, ScriptedAnalyzer, SetupError};
pub use gateway::AnalysisGateway;
