//! The external page-analysis collaborator, behind a narrow trait.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use url::Url;

/// What the collaborator reports for one page load, before normalization.
///
/// Hrefs arrive exactly as found in the page (absolute, relative, or
/// non-navigable schemes); the gateway normalizes them. Artifact handles are
/// opaque and never interpreted by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPageSnapshot {
    /// Raw href values of every link found on the page.
    pub hrefs: Vec<String>,
    /// Number of forms visible on the page.
    pub form_count: u32,
    /// Number of interactive elements (buttons, selects, etc.).
    pub interactive_element_count: u32,
    /// URLs of XHR/fetch requests observed during load.
    pub api_requests: Vec<String>,
    /// Page-load duration in milliseconds.
    pub timing_ms: u64,
    /// Runtime errors surfaced during load/interaction.
    pub runtime_errors: Vec<String>,
    /// Opaque artifact handles (screenshot references etc.).
    pub captured_artifacts: Vec<String>,
}

/// The collaborator could not produce a snapshot. Non-fatal: the scheduler
/// converts it into a test-failure defect and moves on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("navigation timed out loading {url}")]
    NavigationTimeout { url: String },

    #[error("analysis collaborator unreachable: {0}")]
    Unreachable(String),

    #[error("collaborator response had an unexpected shape: {0}")]
    UnexpectedShape(String),
}

/// The collaborator cannot be initialized at all. Fatal: aborts the run
/// before the scheduling loop starts.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("invalid target origin '{origin}': {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("analysis collaborator failed to initialize: {0}")]
    CollaboratorInit(String),
}

/// Narrow seam to the external page-analysis collaborator.
///
/// Production implementations drive a browser-automation service; tests and
/// demos use [`ScriptedAnalyzer`]. The engine never parses markup itself.
pub trait PageAnalyzer {
    /// One-time startup. Failures here are fatal for the run.
    fn init(&mut self) -> Result<(), SetupError> {
        Ok(())
    }

    /// Load the page at `url` and report what was observed.
    fn analyze(&mut self, url: &Url) -> Result<RawPageSnapshot, AnalysisError>;
}

/// Scripted collaborator — returns queued responses per logical path.
///
/// Lets the scheduler run without a real browser. A path with several
/// queued responses yields them in order; the final response repeats, so
/// retry loops observe a stable page. Unknown paths report the collaborator
/// as unreachable.
#[derive(Debug, Default)]
pub struct ScriptedAnalyzer {
    scripts: HashMap<String, VecDeque<Result<RawPageSnapshot, AnalysisError>>>,
    analyzed: Vec<String>,
}

impl ScriptedAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response for a logical path.
    pub fn on_path(&mut self, path: &str, raw: RawPageSnapshot) -> &mut Self {
        self.scripts
            .entry(path.to_string())
            .or_default()
            .push_back(Ok(raw));
        self
    }

    /// Queue a failure for a logical path.
    pub fn fail_path(&mut self, path: &str, err: AnalysisError) -> &mut Self {
        self.scripts
            .entry(path.to_string())
            .or_default()
            .push_back(Err(err));
        self
    }

    /// Logical paths analyzed so far, in call order.
    pub fn analyzed(&self) -> &[String] {
        &self.analyzed
    }
}

impl PageAnalyzer for ScriptedAnalyzer {
    fn analyze(&mut self, url: &Url) -> Result<RawPageSnapshot, AnalysisError> {
        let path = match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        };
        self.analyzed.push(path.clone());

        let responses = self
            .scripts
            .get_mut(&path)
            .ok_or_else(|| AnalysisError::Unreachable(format!("no script for {path}")))?;

        if responses.len() > 1 {
            responses.pop_front().unwrap()
        } else {
            responses
                .front()
                .cloned()
                .ok_or_else(|| AnalysisError::Unreachable(format!("script for {path} is empty")))?
        }
    }
}
