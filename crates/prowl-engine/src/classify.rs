//! Defect classifier — pure mapping from a page snapshot (plus an optional
//! AI/heuristic judgment) to a list of defects.

use prowl_model::types::{Defect, DefectKind, PageSnapshot, Severity};
use serde::{Deserialize, Serialize};

/// Pages slower than this are classified as performance defects.
pub const PERFORMANCE_BUDGET_MS: u64 = 3000;

/// Judgments below this confidence contribute no additional defects.
pub const JUDGMENT_CONFIDENCE_FLOOR: f64 = 0.5;

/// Response of the optional AI/heuristic judgment collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Judgment {
    pub defects: Vec<Defect>,
    /// Collaborator's self-reported confidence in [0, 1].
    pub confidence: f64,
}

/// The judgment collaborator failed or returned something unusable. Never
/// aborts classification; the deterministic rules still apply.
#[derive(Debug, Clone, thiserror::Error)]
pub enum JudgeError {
    #[error("judgment collaborator failed: {0}")]
    Failed(String),

    #[error("judgment response was malformed: {0}")]
    Malformed(String),
}

/// Narrow capability seam for the AI/heuristic judgment collaborator. Any
/// implementation — a no-op stub, a remote call, a local heuristic — is
/// interchangeable.
pub trait DefectJudge {
    fn judge(&mut self, snapshot: &PageSnapshot) -> Result<Judgment, JudgeError>;
}

/// Judgment collaborator that never adds defects.
#[derive(Debug, Default)]
pub struct NoopJudge;

impl DefectJudge for NoopJudge {
    fn judge(&mut self, _snapshot: &PageSnapshot) -> Result<Judgment, JudgeError> {
        Ok(Judgment {
            defects: Vec::new(),
            confidence: 1.0,
        })
    }
}

/// Classify a snapshot. The two deterministic rules always apply; a present,
/// confident judgment may append additional defects.
pub fn classify(snapshot: &PageSnapshot, judgment: Option<&Judgment>) -> Vec<Defect> {
    let mut defects = Vec::new();

    for error in &snapshot.runtime_errors {
        defects.push(Defect::detected(
            DefectKind::RuntimeError,
            Severity::High,
            format!("runtime error during page load: {error}"),
            &snapshot.path,
        ));
    }

    if snapshot.timing_ms > PERFORMANCE_BUDGET_MS {
        defects.push(Defect::detected(
            DefectKind::Performance,
            Severity::Medium,
            format!(
                "page loaded in {}ms, over the {}ms budget",
                snapshot.timing_ms, PERFORMANCE_BUDGET_MS
            ),
            &snapshot.path,
        ));
    }

    if let Some(judgment) = judgment {
        if judgment.confidence >= JUDGMENT_CONFIDENCE_FLOOR {
            defects.extend(judgment.defects.iter().cloned());
        }
    }

    defects
}

#[cfg(test)]
mod tests {
    use super::*;
    use prowl_model::types::DefectStatus;

    fn snapshot(timing_ms: u64, runtime_errors: Vec<String>) -> PageSnapshot {
        PageSnapshot {
            work_item_id: "initial:/".to_string(),
            path: "/".to_string(),
            outbound_paths: vec![],
            has_form: false,
            has_interactive_element: false,
            has_api_traffic: false,
            timing_ms,
            runtime_errors,
            captured_artifacts: vec![],
        }
    }

    #[test]
    fn test_clean_snapshot_has_no_defects() {
        assert!(classify(&snapshot(100, vec![]), None).is_empty());
    }

    #[test]
    fn test_each_runtime_error_is_one_high_defect() {
        let s = snapshot(100, vec!["a".to_string(), "b".to_string()]);
        let defects = classify(&s, None);

        assert_eq!(defects.len(), 2);
        for d in &defects {
            assert_eq!(d.kind, DefectKind::RuntimeError);
            assert_eq!(d.severity, Severity::High);
            assert_eq!(d.status, DefectStatus::Detected);
            assert_eq!(d.path, "/");
        }
    }

    #[test]
    fn test_slow_page_is_one_performance_defect() {
        let defects = classify(&snapshot(3500, vec![]), None);

        assert_eq!(defects.len(), 1);
        assert_eq!(defects[0].kind, DefectKind::Performance);
        assert_eq!(defects[0].severity, Severity::Medium);
        assert!(defects[0].description.contains("3500"));
    }

    #[test]
    fn test_budget_boundary_is_not_a_defect() {
        assert!(classify(&snapshot(PERFORMANCE_BUDGET_MS, vec![]), None).is_empty());
        assert_eq!(classify(&snapshot(PERFORMANCE_BUDGET_MS + 1, vec![]), None).len(), 1);
    }

    #[test]
    fn test_both_rules_fire_independently() {
        let s = snapshot(4000, vec!["boom".to_string()]);
        let defects = classify(&s, None);

        assert_eq!(defects.len(), 2);
        assert!(defects.iter().any(|d| d.kind == DefectKind::RuntimeError));
        assert!(defects.iter().any(|d| d.kind == DefectKind::Performance));
    }

    #[test]
    fn test_confident_judgment_appends_defects() {
        let judgment = Judgment {
            defects: vec![Defect::detected(
                DefectKind::ApiError,
                Severity::Low,
                "suspicious 500".to_string(),
                "/",
            )],
            confidence: 0.9,
        };
        let defects = classify(&snapshot(100, vec![]), Some(&judgment));

        assert_eq!(defects.len(), 1);
        assert_eq!(defects[0].kind, DefectKind::ApiError);
    }

    #[test]
    fn test_low_confidence_judgment_is_ignored() {
        let judgment = Judgment {
            defects: vec![Defect::detected(
                DefectKind::ApiError,
                Severity::Low,
                "maybe".to_string(),
                "/",
            )],
            confidence: 0.2,
        };
        // Deterministic rules still apply on their own.
        let defects = classify(&snapshot(3500, vec![]), Some(&judgment));

        assert_eq!(defects.len(), 1);
        assert_eq!(defects[0].kind, DefectKind::Performance);
    }

    #[test]
    fn test_noop_judge_is_confident_and_empty() {
        let mut judge = NoopJudge;
        let judgment = judge.judge(&snapshot(100, vec![])).unwrap();
        assert!(judgment.defects.is_empty());
        assert!(judgment.confidence >= JUDGMENT_CONFIDENCE_FLOOR);
    }
}
