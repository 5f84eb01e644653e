use prowl_core::RunManager;
use prowl_engine::run::RunConfig;
use prowl_engine::NoopJudge;
use prowl_gateway::{RawPageSnapshot, ScriptedAnalyzer};

const ORIGIN: &str = "http://shop.test";

fn scripted() -> ScriptedAnalyzer {
    let mut analyzer = ScriptedAnalyzer::new();
    analyzer.on_path(
        "/",
        RawPageSnapshot {
            hrefs: vec!["/about".to_string()],
            timing_ms: 30,
            ..Default::default()
        },
    );
    analyzer.on_path("/about", RawPageSnapshot::default());
    analyzer
}

#[test]
fn test_new_manager_is_empty() {
    let manager = RunManager::new();
    assert_eq!(manager.completed_run_count(), 0);
    assert!(manager.get_run("run-0001").is_none());
}

#[test]
fn test_execute_stores_report() {
    let manager = RunManager::new();
    let id = manager
        .execute(&RunConfig::new(ORIGIN), scripted(), NoopJudge)
        .unwrap();

    assert_eq!(manager.completed_run_count(), 1);
    let record = manager.get_run(&id).unwrap();
    assert_eq!(record.origin, ORIGIN);
    assert_eq!(record.report.summary.total_completed, 2);
    assert_eq!(record.report.summary.coverage_percent, 100.0);
}

#[test]
fn test_setup_failure_stores_nothing() {
    let manager = RunManager::new();
    let result = manager.execute(&RunConfig::new("nope"), scripted(), NoopJudge);

    assert!(result.is_err());
    assert_eq!(manager.completed_run_count(), 0);
}

#[test]
fn test_runs_are_independent() {
    let manager = RunManager::new();
    let id1 = manager
        .execute(&RunConfig::new(ORIGIN), scripted(), NoopJudge)
        .unwrap();
    let id2 = manager
        .execute(&RunConfig::new(ORIGIN), scripted(), NoopJudge)
        .unwrap();

    assert_ne!(id1, id2);
    assert_eq!(manager.completed_run_count(), 2);

    // Neither run sees the other's ledger: both report the same discovery
    // counts from identical scripts.
    let r1 = manager.get_run(&id1).unwrap().report;
    let r2 = manager.get_run(&id2).unwrap().report;
    assert_eq!(
        r1.summary.total_discovered_routes,
        r2.summary.total_discovered_routes
    );
}

#[test]
fn test_report_json_has_contract_shape() {
    let manager = RunManager::new();
    let id = manager
        .execute(&RunConfig::new(ORIGIN), scripted(), NoopJudge)
        .unwrap();

    let json = manager.report_json(&id).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(v["summary"]["coveragePercent"].is_f64());
    assert!(v["completedWork"].is_array());
}
