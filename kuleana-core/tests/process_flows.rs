use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use kuleana_common::prelude::*;
use kuleana_common::{
    ActivityError, ActivityName, ActivityOutput, AssessmentResult, DocumentReviewResult,
    InspectionReport, RetryPolicy, SchedulingResult, StartProcessRequest, ZoningResult,
};
use kuleana_core::{
    ActivityHandler, ActivityRegistry, EngineProperties, HistoryEventKind, InstanceStatus,
    ProcessInstance, StepContext, WorkflowEngine,
};

fn init_logs() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}

fn engine_with(registry: ActivityRegistry) -> Arc<WorkflowEngine> {
    WorkflowEngine::new(EngineProperties::default(), registry)
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

struct NoInvestigationAssessment;

#[async_trait]
impl ActivityHandler for NoInvestigationAssessment {
    async fn execute(&self, ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        let complaint = ctx.complaint()?;
        Ok(ActivityOutput::Assessment(AssessmentResult {
            requires_investigation: false,
            priority: complaint.priority,
            estimated_duration: InlineStr::from("n/a"),
        }))
    }
}

struct IncompleteDocuments;

#[async_trait]
impl ActivityHandler for IncompleteDocuments {
    async fn execute(&self, _ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        Ok(ActivityOutput::DocumentReview(DocumentReviewResult {
            valid: false,
            documents_reviewed: 1,
            missing_documents: vec![InlineStr::from("notarized statement")],
        }))
    }
}

struct FollowUpReport;

#[async_trait]
impl ActivityHandler for FollowUpReport {
    async fn execute(&self, _ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        Ok(ActivityOutput::InspectionReport(InspectionReport {
            report_id: InlineStr::from("INSP-override"),
            summary: InlineStr::from("Open findings recorded"),
            requires_follow_up: true,
            violations: vec![InlineStr::from("Trash storage")],
        }))
    }
}

struct SchedulingConflict;

#[async_trait]
impl ActivityHandler for SchedulingConflict {
    async fn execute(&self, _ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        Ok(ActivityOutput::Scheduling(SchedulingResult {
            success: false,
            scheduled_date: InlineStr::new(),
            inspector: InlineStr::new(),
        }))
    }
}

/// Fails transiently for the first `failures` calls, then succeeds.
struct FlakyZoning {
    calls: AtomicU32,
    failures: u32,
}

#[async_trait]
impl ActivityHandler for FlakyZoning {
    async fn execute(&self, _ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failures {
            return Err(ActivityError::Transient(format!(
                "zoning registry unavailable (call {})",
                call
            )));
        }
        Ok(ActivityOutput::Zoning(ZoningResult {
            compliant: true,
            zoning_code: InlineStr::from("R-2"),
            restrictions: Vec::new(),
        }))
    }
}

struct CountingValidationFailure {
    calls: AtomicU32,
}

#[async_trait]
impl ActivityHandler for CountingValidationFailure {
    async fn execute(&self, _ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ActivityError::Validation(
            "appeal record failed legal precondition".to_string(),
        ))
    }
}

fn registration_input() -> serde_json::Value {
    json!({
        "applicationId": "APP-1",
        "propertyId": "P-1",
        "applicantName": "Jane",
        "requiresNCUC": false
    })
}

#[tokio::test(start_paused = true)]
async fn investigation_with_violations_generates_a_notice() {
    init_logs();
    let engine = engine_with(ActivityRegistry::with_defaults());

    let workflow_id = engine
        .start(StartProcessRequest::new(
            "ComplaintInvestigationWorkflow",
            json!({ "complaintId": "COMP-1", "priority": 2 }),
        ))
        .expect("start investigation");

    let instance = run_to_terminal(&engine, &workflow_id).await;
    assert_eq!(instance.status, InstanceStatus::Violated);

    for step in [
        "ASSESSMENT",
        "EVIDENCE_COLLECTION",
        "SITE_VISIT",
        "REPORT_GENERATION",
        "VIOLATION_DETERMINATION",
        "NOTICE_GENERATION",
    ] {
        assert_eq!(step_entries(&instance, step), 1, "missing step {}", step);
    }

    let result = instance.result.as_ref().expect("terminal result");
    assert_eq!(result["status"], "violated");
    assert!(result["violationId"]
        .as_str()
        .expect("violationId")
        .starts_with("NOTICE-"));
    assert_eq!(result["evidence"]["photos"].as_array().unwrap().len(), 2);
    assert!(result["report"]["reportId"].as_str().unwrap().starts_with("RPT-"));
}

#[tokio::test(start_paused = true)]
async fn assessment_without_findings_exits_compliant() {
    init_logs();
    let registry = ActivityRegistry::with_defaults();
    registry.register(
        ActivityName::PerformInitialAssessment,
        Arc::new(NoInvestigationAssessment),
    );
    let engine = engine_with(registry);

    let workflow_id = engine
        .start(StartProcessRequest::new(
            "ComplaintInvestigationWorkflow",
            json!({ "complaintId": "COMP-2", "priority": 1 }),
        ))
        .expect("start investigation");

    let instance = run_to_terminal(&engine, &workflow_id).await;
    assert_eq!(instance.status, InstanceStatus::Compliant);

    // STARTED, ASSESSMENT, COMPLETED - nothing else ever ran
    assert_eq!(instance.history.len(), 3);
    assert_eq!(step_entries(&instance, "ASSESSMENT"), 1);
    assert_eq!(step_entries(&instance, "EVIDENCE_COLLECTION"), 0);
    assert_eq!(step_entries(&instance, "SITE_VISIT"), 0);
    assert_eq!(step_entries(&instance, "REPORT_GENERATION"), 0);

    let result = instance.result.as_ref().expect("terminal result");
    assert_eq!(result["status"], "compliant");
}

#[tokio::test(start_paused = true)]
async fn appeal_is_overturned_by_default() {
    init_logs();
    let engine = engine_with(ActivityRegistry::with_defaults());

    let workflow_id = engine
        .start(StartProcessRequest::new(
            "ViolationAppealWorkflow",
            json!({ "appealId": "APPEAL-1" }),
        ))
        .expect("start appeal");

    let instance = run_to_terminal(&engine, &workflow_id).await;
    assert_eq!(instance.status, InstanceStatus::Overturned);
    assert_eq!(step_entries(&instance, "NOTIFICATION"), 1);

    let result = instance.result.as_ref().expect("terminal result");
    assert_eq!(result["decision"], "Appeal granted based on new evidence");
    assert!(result["decidedAt"].is_string());
}

#[tokio::test(start_paused = true)]
async fn invalid_appeal_documents_uphold_the_violation() {
    init_logs();
    let registry = ActivityRegistry::with_defaults();
    registry.register(
        ActivityName::ReviewAppealDocuments,
        Arc::new(IncompleteDocuments),
    );
    let engine = engine_with(registry);

    let workflow_id = engine
        .start(StartProcessRequest::new(
            "ViolationAppealWorkflow",
            json!({ "appealId": "APPEAL-3" }),
        ))
        .expect("start appeal");

    let instance = run_to_terminal(&engine, &workflow_id).await;
    assert_eq!(instance.status, InstanceStatus::Upheld);
    assert_eq!(step_entries(&instance, "DOCUMENT_REVIEW"), 1);
    assert_eq!(step_entries(&instance, "LEGAL_REVIEW"), 0);

    let result = instance.result.as_ref().expect("terminal result");
    assert_eq!(result["reason"], "Documentation incomplete");
}

#[tokio::test(start_paused = true)]
async fn annual_inspection_verifies_compliance() {
    init_logs();
    let engine = engine_with(ActivityRegistry::with_defaults());

    let workflow_id = engine
        .start(StartProcessRequest::new(
            "AnnualInspectionWorkflow",
            json!({ "inspectionId": "INSPECT-1", "propertyId": "P-1" }),
        ))
        .expect("start inspection");

    let instance = run_to_terminal(&engine, &workflow_id).await;
    assert_eq!(instance.status, InstanceStatus::Compliant);
    assert_eq!(step_entries(&instance, "COMPLIANCE_VERIFICATION"), 1);
    assert_eq!(step_entries(&instance, "FOLLOW_UP"), 0);

    let result = instance.result.as_ref().expect("terminal result");
    assert_eq!(result["report"], "Annual inspection completed");
}

#[tokio::test(start_paused = true)]
async fn open_findings_route_through_follow_up() {
    init_logs();
    let registry = ActivityRegistry::with_defaults();
    registry.register(ActivityName::GenerateInspectionReport, Arc::new(FollowUpReport));
    let engine = engine_with(registry);

    let workflow_id = engine
        .start(StartProcessRequest::new(
            "AnnualInspectionWorkflow",
            json!({ "inspectionId": "INSPECT-2", "propertyId": "P-2" }),
        ))
        .expect("start inspection");

    let instance = run_to_terminal(&engine, &workflow_id).await;
    assert_eq!(instance.status, InstanceStatus::Violated);
    assert_eq!(step_entries(&instance, "FOLLOW_UP"), 1);
    assert_eq!(step_entries(&instance, "COMPLIANCE_VERIFICATION"), 0);

    let result = instance.result.as_ref().expect("terminal result");
    assert_eq!(result["violations"][0], "Trash storage");
}

#[tokio::test(start_paused = true)]
async fn scheduling_conflict_reschedules_the_inspection() {
    init_logs();
    let registry = ActivityRegistry::with_defaults();
    registry.register(
        ActivityName::ScheduleInspectionDate,
        Arc::new(SchedulingConflict),
    );
    let engine = engine_with(registry);

    let workflow_id = engine
        .start(StartProcessRequest::new(
            "AnnualInspectionWorkflow",
            json!({ "inspectionId": "INSPECT-3", "propertyId": "P-3" }),
        ))
        .expect("start inspection");

    let instance = run_to_terminal(&engine, &workflow_id).await;
    assert_eq!(instance.status, InstanceStatus::Rescheduled);
    assert_eq!(instance.history.len(), 3);
    assert_eq!(step_entries(&instance, "ON_SITE_INSPECTION"), 0);

    let result = instance.result.as_ref().expect("terminal result");
    assert_eq!(result["reason"], "Scheduling conflict");
}

#[tokio::test(start_paused = true)]
async fn transient_failures_retry_until_success() {
    init_logs();
    let flaky = Arc::new(FlakyZoning {
        calls: AtomicU32::new(0),
        failures: 2,
    });
    let registry = ActivityRegistry::with_defaults();
    registry.register(ActivityName::VerifyZoning, flaky.clone());
    let engine = engine_with(registry);

    let workflow_id = engine
        .start(StartProcessRequest::new(
            "TVRRegistrationWorkflow",
            registration_input(),
        ))
        .expect("start registration");

    let instance = run_to_terminal(&engine, &workflow_id).await;
    assert_eq!(instance.status, InstanceStatus::Approved);
    assert_eq!(flaky.calls.load(Ordering::SeqCst), 3);
    assert_eq!(step_entries(&instance, "ZONING_CHECK"), 1);
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_fall_back_to_rejection() {
    init_logs();
    let flaky = Arc::new(FlakyZoning {
        calls: AtomicU32::new(0),
        failures: u32::MAX,
    });
    let registry = ActivityRegistry::with_defaults();
    registry.register(ActivityName::VerifyZoning, flaky.clone());
    let properties = EngineProperties {
        retry_policy: RetryPolicy {
            max_attempts: 3,
            initial_interval: std::time::Duration::from_secs(30),
            backoff_multiplier: 2.0,
            max_interval: None,
        },
        ..EngineProperties::default()
    };
    let engine = WorkflowEngine::new(properties, registry);

    let workflow_id = engine
        .start(StartProcessRequest::new(
            "TVRRegistrationWorkflow",
            registration_input(),
        ))
        .expect("start registration");

    let instance = run_to_terminal(&engine, &workflow_id).await;
    assert_eq!(instance.status, InstanceStatus::Rejected);
    assert_eq!(flaky.calls.load(Ordering::SeqCst), 3);

    let error = instance.error.as_ref().expect("failure error captured");
    assert!(error.contains("retry budget exhausted after 3 attempts"));
}

#[tokio::test(start_paused = true)]
async fn validation_failures_are_never_retried() {
    init_logs();
    let failing = Arc::new(CountingValidationFailure {
        calls: AtomicU32::new(0),
    });
    let registry = ActivityRegistry::with_defaults();
    registry.register(ActivityName::PerformLegalReview, failing.clone());
    let engine = engine_with(registry);

    let workflow_id = engine
        .start(StartProcessRequest::new(
            "ViolationAppealWorkflow",
            json!({ "appealId": "APPEAL-4" }),
        ))
        .expect("start appeal");

    let instance = run_to_terminal(&engine, &workflow_id).await;
    // appeals fall back to PENDING on step failure
    assert_eq!(instance.status, InstanceStatus::Pending);
    assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
    assert!(instance
        .error
        .as_ref()
        .expect("failure error captured")
        .contains("legal precondition"));
}

#[tokio::test(start_paused = true)]
async fn cancellation_halts_a_pending_delay() {
    init_logs();
    let engine = engine_with(ActivityRegistry::with_defaults());

    let workflow_id = engine
        .start(StartProcessRequest::new(
            "TVRRegistrationWorkflow",
            registration_input(),
        ))
        .expect("start registration");

    engine.cancel(&workflow_id).expect("cancel running instance");

    let instance = run_to_terminal(&engine, &workflow_id).await;
    assert_eq!(instance.status, InstanceStatus::Cancelled);
    assert!(instance.end_time.is_some());
    assert_eq!(
        instance.history.last().unwrap().kind,
        HistoryEventKind::Cancelled
    );
    assert_eq!(step_entries(&instance, "INITIAL_REVIEW"), 0);

    // terminal instances reject further cancellation
    let err = engine.cancel(&workflow_id).expect_err("already terminal");
    assert_eq!(err.code(), ErrorCode::conflict_code());
}
