//! The gateway adapter: builds the absolute URL for a work item, invokes
//! the collaborator, and normalizes the raw response into a `PageSnapshot`.

use std::collections::HashSet;

use prowl_model::types::{PageSnapshot, WorkItem};
use tracing::debug;
use url::Url;

use crate::analyzer::{AnalysisError, PageAnalyzer, RawPageSnapshot, SetupError};
use crate::normalize::normalize_href;

/// Thin adapter between the scheduler and the page-analysis collaborator.
///
/// Owns the target origin; work items carry only origin-relative paths.
pub struct AnalysisGateway<A: PageAnalyzer> {
    origin: Url,
    analyzer: A,
}

impl<A: PageAnalyzer> AnalysisGateway<A> {
    /// Parse the target origin and initialize the collaborator. Either
    /// failure is fatal for the run.
    pub fn new(origin: &str, mut analyzer: A) -> Result<Self, SetupError> {
        let origin = Url::parse(origin).map_err(|e| SetupError::InvalidOrigin {
            origin: origin.to_string(),
            reason: e.to_string(),
        })?;
        if origin.scheme() != "http" && origin.scheme() != "https" {
            return Err(SetupError::InvalidOrigin {
                origin: origin.to_string(),
                reason: "origin must be http or https".to_string(),
            });
        }
        analyzer.init()?;
        Ok(Self { origin, analyzer })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Analyze one work item's path and normalize the result.
    pub fn analyze(&mut self, item: &WorkItem) -> Result<PageSnapshot, AnalysisError> {
        let page_url = self.origin.join(&item.path).map_err(|e| {
            AnalysisError::UnexpectedShape(format!("cannot resolve path '{}': {e}", item.path))
        })?;

        debug!(item_id = %item.id, url = %page_url, "analyzing page");
        let raw = self.analyzer.analyze(&page_url)?;

        Ok(self.normalize(item, &page_url, raw))
    }

    fn normalize(&self, item: &WorkItem, page_url: &Url, raw: RawPageSnapshot) -> PageSnapshot {
        let mut seen = HashSet::new();
        let mut outbound = Vec::new();
        for href in &raw.hrefs {
            if let Some(path) = normalize_href(page_url, href) {
                if seen.insert(path.clone()) {
                    outbound.push(path);
                }
            }
        }

        PageSnapshot {
            work_item_id: item.id.clone(),
            path: item.path.clone(),
            outbound_paths: outbound,
            has_form: raw.form_count > 0,
            has_interactive_element: raw.interactive_element_count > 0,
            has_api_traffic: !raw.api_requests.is_empty(),
            timing_ms: raw.timing_ms,
            runtime_errors: raw.runtime_errors,
            captured_artifacts: raw.captured_artifacts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::ScriptedAnalyzer;
    use prowl_model::types::WorkItem;

    fn gateway_with(path: &str, raw: RawPageSnapshot) -> AnalysisGateway<ScriptedAnalyzer> {
        let mut analyzer = ScriptedAnalyzer::new();
        analyzer.on_path(path, raw);
        AnalysisGateway::new("http://shop.test", analyzer).unwrap()
    }

    #[test]
    fn test_invalid_origin_is_setup_error() {
        let result = AnalysisGateway::new("not a url", ScriptedAnalyzer::new());
        assert!(matches!(result, Err(SetupError::InvalidOrigin { .. })));

        let result = AnalysisGateway::new("ftp://shop.test", ScriptedAnalyzer::new());
        assert!(matches!(result, Err(SetupError::InvalidOrigin { .. })));
    }

    #[test]
    fn test_outbound_paths_normalized_and_deduplicated() {
        let raw = RawPageSnapshot {
            hrefs: vec![
                "/a".to_string(),
                "http://shop.test/a".to_string(),
                "b".to_string(),
                "http://other.test/x".to_string(),
                "mailto:x@y.z".to_string(),
            ],
            ..Default::default()
        };
        let mut gw = gateway_with("/", raw);
        let snapshot = gw.analyze(&WorkItem::seed("/")).unwrap();

        assert_eq!(snapshot.outbound_paths, vec!["/a".to_string(), "/b".to_string()]);
    }

    #[test]
    fn test_capability_flags_derived_from_counts() {
        let raw = RawPageSnapshot {
            form_count: 1,
            interactive_element_count: 0,
            api_requests: vec!["/api/products".to_string()],
            ..Default::default()
        };
        let mut gw = gateway_with("/", raw);
        let snapshot = gw.analyze(&WorkItem::seed("/")).unwrap();

        assert!(snapshot.has_form);
        assert!(!snapshot.has_interactive_element);
        assert!(snapshot.has_api_traffic);
    }

    #[test]
    fn test_snapshot_carries_item_identity() {
        let mut gw = gateway_with("/cart", RawPageSnapshot::default());
        let item = WorkItem::seed("/cart");
        let snapshot = gw.analyze(&item).unwrap();

        assert_eq!(snapshot.work_item_id, item.id);
        assert_eq!(snapshot.path, "/cart");
    }

    #[test]
    fn test_collaborator_failure_propagates() {
        let mut analyzer = ScriptedAnalyzer::new();
        analyzer.fail_path(
            "/",
            AnalysisError::NavigationTimeout {
                url: "http://shop.test/".to_string(),
            },
        );
        let mut gw = AnalysisGateway::new("http://shop.test", analyzer).unwrap();

        let err = gw.analyze(&WorkItem::seed("/")).unwrap_err();
        assert!(matches!(err, AnalysisError::NavigationTimeout { .. }));
    }
}
