//! Complaint investigation: assessment, evidence collection, site
//! visit, report, violation determination, notice. An assessment that
//! needs no investigation exits straight to COMPLIANT.

use chrono::Utc;
use serde_json::json;

use kuleana_common::prelude::*;
use kuleana_common::{ActivityName, ActivityOutput, WorkflowKind};

use super::step::{days, EarlyExit, ProcessDefinition, StepDef, Terminal};
use crate::model::InstanceStatus;
use crate::runtime::execution::StepContext;

pub static COMPLAINT_INVESTIGATION: ProcessDefinition = ProcessDefinition {
    kind: WorkflowKind::ComplaintInvestigation,
    fallback: InstanceStatus::Pending,
    steps: &[
        StepDef {
            name: "ASSESSMENT",
            delay: days(1),
            activity: ActivityName::PerformInitialAssessment,
            condition: None,
            on_result: Some(assessment_outcome),
        },
        StepDef {
            name: "EVIDENCE_COLLECTION",
            delay: days(3),
            activity: ActivityName::CollectEvidence,
            condition: None,
            on_result: None,
        },
        StepDef {
            name: "SITE_VISIT",
            delay: days(2),
            activity: ActivityName::ConductSiteVisit,
            condition: None,
            on_result: None,
        },
        StepDef {
            name: "REPORT_GENERATION",
            delay: days(2),
            activity: ActivityName::GenerateInvestigationReport,
            condition: None,
            on_result: None,
        },
        StepDef {
            name: "VIOLATION_DETERMINATION",
            delay: days(1),
            activity: ActivityName::DetermineViolations,
            condition: None,
            on_result: None,
        },
        StepDef {
            name: "NOTICE_GENERATION",
            delay: days(1),
            activity: ActivityName::GenerateNotice,
            condition: None,
            on_result: None,
        },
    ],
    finish: conclude,
};

fn assessment_outcome(output: &ActivityOutput) -> Option<EarlyExit> {
    let assessment = output.as_assessment()?;
    if assessment.requires_investigation {
        return None;
    }
    Some(EarlyExit {
        status: InstanceStatus::Compliant,
        result: json!({ "status": "compliant", "completedAt": Utc::now().to_rfc3339() }),
    })
}

fn conclude(ctx: &StepContext) -> KResult<Terminal> {
    let determination = ctx
        .output(ActivityName::DetermineViolations)
        .and_then(|output| output.as_violation_determination())
        .ok_or_else(|| {
            ErrorCode::ExecutionException("violation determination missing from execution context")
        })?;
    let notice = ctx
        .output(ActivityName::GenerateNotice)
        .and_then(|output| output.as_notice())
        .ok_or_else(|| {
            ErrorCode::ExecutionException("compliance notice missing from execution context")
        })?;
    let evidence = ctx
        .output(ActivityName::CollectEvidence)
        .and_then(|output| output.as_evidence())
        .ok_or_else(|| {
            ErrorCode::ExecutionException("evidence bundle missing from execution context")
        })?;
    let report = ctx
        .output(ActivityName::GenerateInvestigationReport)
        .and_then(|output| output.as_investigation_report())
        .ok_or_else(|| {
            ErrorCode::ExecutionException("investigation report missing from execution context")
        })?;

    let status = if determination.has_violations {
        InstanceStatus::Violated
    } else {
        InstanceStatus::Compliant
    };

    let mut result = json!({
        "status": status.result_label(),
        "evidence": serde_json::to_value(evidence)?,
        "report": serde_json::to_value(report)?,
        "completedAt": Utc::now().to_rfc3339(),
    });
    if determination.has_violations {
        // the violation case is tracked under the generated notice id
        result["violationId"] = json!(notice.notice_id);
    }

    Ok(Terminal { status, result })
}
