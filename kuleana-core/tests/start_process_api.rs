use std::sync::Arc;

use chrono::DateTime;
use serde_json::json;

use kuleana_common::prelude::*;
use kuleana_common::StartProcessRequest;
use kuleana_core::{
    ActivityRegistry, EngineProperties, ExecutionService, HistoryEventKind, InstanceStatus,
    ProcessInstance, WorkflowEngine, WorkflowService,
};

fn init_logs() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}

fn new_engine() -> Arc<WorkflowEngine> {
    WorkflowEngine::new(EngineProperties::default(), ActivityRegistry::with_defaults())
}

async fn run_to_terminal(engine: &Arc<WorkflowEngine>, workflow_id: &str) -> ProcessInstance {
    engine.drain().await;
    let instance = engine.get(workflow_id).expect("instance exists");
    assert!(instance.status.is_terminal(), "instance still running");
    instance
}

fn step_entries(instance: &ProcessInstance, step_name: &str) -> usize {
    instance
        .history
        .iter()
        .filter(|event| {
            event.kind == HistoryEventKind::StepCompleted && event.details.starts_with(step_name)
        })
        .count()
}

#[tokio::test(start_paused = true)]
async fn start_registration_reaches_approved() {
    init_logs();
    let engine = new_engine();
    let workflows = WorkflowService::new(engine.clone());
    let executions = ExecutionService::new(engine.clone());

    let body = json!({
        "workflowType": "TVRRegistrationWorkflow",
        "input": {
            "applicationId": "APP-1",
            "propertyId": "P-1",
            "applicantName": "Jane",
            "requiresNCUC": false
        }
    });
    let request = StartProcessRequest::try_from(body).expect("parse StartProcessRequest");
    let workflow_id = workflows.start_workflow(request).expect("start_workflow");

    // start returns before any step runs
    let snapshot = executions
        .get_execution_status(&workflow_id)
        .expect("instance exists");
    assert_eq!(snapshot.status, InstanceStatus::Running);
    assert_eq!(snapshot.history.len(), 1);
    assert_eq!(snapshot.history[0].kind, HistoryEventKind::Started);

    let instance = run_to_terminal(&engine, &workflow_id).await;
    assert_eq!(instance.status, InstanceStatus::Approved);
    assert!(instance.error.is_none());
    assert!(instance.end_time.is_some());

    let result = instance.result.as_ref().expect("terminal result");
    let registration_id = result["registrationId"].as_str().expect("registrationId");
    assert!(registration_id.starts_with("REG-"));

    let approved_at = DateTime::parse_from_rfc3339(result["approvedAt"].as_str().unwrap())
        .expect("approvedAt is RFC 3339");
    assert!(approved_at.timestamp_millis() >= instance.start_time);

    // STARTED, four steps (no NCUC), COMPLETED
    assert_eq!(instance.history.len(), 6);
    assert_eq!(
        instance.history.last().unwrap().kind,
        HistoryEventKind::Completed
    );
    for pair in instance.history.windows(2) {
        assert!(pair[0].timestamp < pair[1].timestamp);
    }
}

#[tokio::test(start_paused = true)]
async fn ncuc_processing_adds_exactly_one_history_entry() {
    init_logs();
    let engine = new_engine();

    let without_ncuc = engine
        .start(StartProcessRequest::new(
            "TVRRegistrationWorkflow",
            json!({
                "applicationId": "APP-10",
                "propertyId": "P-10",
                "applicantName": "Keanu",
                "requiresNCUC": false
            }),
        ))
        .expect("start without NCUC");
    let with_ncuc = engine
        .start(StartProcessRequest::new(
            "TVRRegistrationWorkflow",
            json!({
                "applicationId": "APP-11",
                "propertyId": "P-11",
                "applicantName": "Leilani",
                "requiresNCUC": true
            }),
        ))
        .expect("start with NCUC");

    engine.drain().await;
    let baseline = engine.get(&without_ncuc).unwrap();
    let extended = engine.get(&with_ncuc).unwrap();

    assert_eq!(baseline.status, InstanceStatus::Approved);
    assert_eq!(extended.status, InstanceStatus::Approved);
    assert_eq!(baseline.history.len() + 1, extended.history.len());
    assert_eq!(step_entries(&baseline, "NCUC_PROCESSING"), 0);
    assert_eq!(step_entries(&extended, "NCUC_PROCESSING"), 1);
}

#[tokio::test(start_paused = true)]
async fn missing_application_information_rejects_without_zoning() {
    init_logs();
    let engine = new_engine();

    let workflow_id = engine
        .start(StartProcessRequest::new(
            "TVRRegistrationWorkflow",
            json!({ "applicationId": "APP-1", "propertyId": "", "applicantName": "" }),
        ))
        .expect("start");

    let instance = run_to_terminal(&engine, &workflow_id).await;
    assert_eq!(instance.status, InstanceStatus::Rejected);

    let error = instance.error.as_ref().expect("failure error captured");
    assert!(error.contains("Missing required application information"));

    // the failing initial review aborts the rest of the definition
    assert_eq!(step_entries(&instance, "INITIAL_REVIEW"), 0);
    assert_eq!(step_entries(&instance, "ZONING_CHECK"), 0);
    assert_eq!(
        instance.history.last().unwrap().kind,
        HistoryEventKind::Failed
    );

    let result = instance.result.as_ref().expect("failure result");
    assert_eq!(result["status"], "rejected");
}

#[tokio::test(start_paused = true)]
async fn unknown_workflow_type_is_rejected_at_start() {
    init_logs();
    let engine = new_engine();

    let err = engine
        .start(StartProcessRequest::new("NoSuchWorkflow", json!({})))
        .expect_err("unknown type must not start");
    assert_eq!(err.code(), ErrorCode::unknown_workflow_type_code());
    assert!(engine.list().is_empty());
}

#[tokio::test(start_paused = true)]
async fn invalid_input_payload_is_rejected_at_start() {
    init_logs();
    let engine = new_engine();

    let err = engine
        .start(StartProcessRequest::new(
            "TVRRegistrationWorkflow",
            json!({ "propertyId": "P-1" }),
        ))
        .expect_err("input without applicationId must not start");
    assert_eq!(err.code(), ErrorCode::illegal_argument_code());
    assert!(engine.list().is_empty());
}

#[tokio::test(start_paused = true)]
async fn get_unknown_instance_returns_not_found() {
    init_logs();
    let engine = new_engine();

    let err = engine.get("does-not-exist").expect_err("missing instance");
    assert_eq!(err.code(), ErrorCode::not_found_code());
}

#[tokio::test(start_paused = true)]
async fn concurrent_instances_stay_independent() {
    init_logs();
    let engine = new_engine();

    let registration_id = engine
        .start(StartProcessRequest::new(
            "TVRRegistrationWorkflow",
            json!({
                "applicationId": "APP-2",
                "propertyId": "P-2",
                "applicantName": "Noa",
                "requiresNCUC": false
            }),
        ))
        .expect("start registration");
    let appeal_id = engine
        .start(StartProcessRequest::new(
            "ViolationAppealWorkflow",
            json!({ "appealId": "APPEAL-2" }),
        ))
        .expect("start appeal");
    assert_ne!(registration_id, appeal_id);

    engine.drain().await;
    let registration = engine.get(&registration_id).unwrap();
    let appeal = engine.get(&appeal_id).unwrap();

    assert_eq!(registration.status, InstanceStatus::Approved);
    assert_eq!(appeal.status, InstanceStatus::Overturned);
    assert_eq!(step_entries(&registration, "DOCUMENT_REVIEW"), 0);
    assert_eq!(step_entries(&appeal, "ZONING_CHECK"), 0);

    // list keeps insertion order
    let summaries = engine.list();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].workflow_id, registration_id);
    assert_eq!(summaries[1].workflow_id, appeal_id);
}
