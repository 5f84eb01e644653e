//! Follow-up generator — pure fan-out from what a snapshot revealed: new
//! routes to visit and capability tests for the current path.

use prowl_model::ledger::RouteLedger;
use prowl_model::types::{PageSnapshot, WorkItem, WorkKind, STANDARD_TEST_CASES};

const ROUTE_DISCOVERY_PRIORITY: u8 = 2;
const CAPABILITY_TEST_PRIORITY: u8 = 3;

/// Derive new work items from a snapshot.
///
/// Outbound paths already in the ledger are skipped here; the scheduler
/// still performs its own check-and-add at enqueue time, so this filter is
/// a pre-pass, not the authority. Emission order is irrelevant — queue
/// front/back policy governs execution order.
pub fn generate(snapshot: &PageSnapshot, ledger: &RouteLedger) -> Vec<WorkItem> {
    let mut items = Vec::new();

    for path in &snapshot.outbound_paths {
        if ledger.contains(path) {
            continue;
        }
        items.push(WorkItem::follow_up(
            WorkKind::RouteDiscovery,
            path,
            ROUTE_DISCOVERY_PRIORITY,
            STANDARD_TEST_CASES.iter().map(|s| s.to_string()).collect(),
        ));
    }

    if snapshot.has_form {
        items.push(WorkItem::follow_up(
            WorkKind::FormTesting,
            &snapshot.path,
            CAPABILITY_TEST_PRIORITY,
            vec!["form-testing".to_string()],
        ));
    }
    if snapshot.has_interactive_element {
        items.push(WorkItem::follow_up(
            WorkKind::InteractionTesting,
            &snapshot.path,
            CAPABILITY_TEST_PRIORITY,
            vec!["interaction-testing".to_string()],
        ));
    }
    if snapshot.has_api_traffic {
        items.push(WorkItem::follow_up(
            WorkKind::ApiTesting,
            &snapshot.path,
            CAPABILITY_TEST_PRIORITY,
            vec!["api-testing".to_string()],
        ));
    }

    items
}
