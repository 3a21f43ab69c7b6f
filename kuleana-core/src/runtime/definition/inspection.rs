//! Annual inspection: scheduling, on-site inspection, report, then
//! either a follow-up or a compliance verification depending on the
//! report. A scheduling conflict exits straight to RESCHEDULED.

use chrono::Utc;
use serde_json::json;

use kuleana_common::prelude::*;
use kuleana_common::{ActivityName, ActivityOutput, WorkflowKind};

use super::step::{days, EarlyExit, ProcessDefinition, StepDef, Terminal};
use crate::model::InstanceStatus;
use crate::runtime::execution::StepContext;

pub static ANNUAL_INSPECTION: ProcessDefinition = ProcessDefinition {
    kind: WorkflowKind::AnnualInspection,
    fallback: InstanceStatus::Rescheduled,
    steps: &[
        StepDef {
            name: "SCHEDULING",
            delay: days(2),
            activity: ActivityName::ScheduleInspectionDate,
            condition: None,
            on_result: Some(scheduling_outcome),
        },
        StepDef {
            name: "ON_SITE_INSPECTION",
            delay: days(1),
            activity: ActivityName::ConductOnSiteInspection,
            condition: None,
            on_result: None,
        },
        StepDef {
            name: "REPORT_GENERATION",
            delay: days(1),
            activity: ActivityName::GenerateInspectionReport,
            condition: None,
            on_result: None,
        },
        // exactly one of the next two runs, keyed off the report
        StepDef {
            name: "FOLLOW_UP",
            delay: days(3),
            activity: ActivityName::ScheduleFollowUp,
            condition: Some(follow_up_required),
            on_result: None,
        },
        StepDef {
            name: "COMPLIANCE_VERIFICATION",
            delay: days(1),
            activity: ActivityName::VerifyCompliance,
            condition: Some(follow_up_not_required),
            on_result: None,
        },
    ],
    finish: conclude,
};

fn report_requires_follow_up(ctx: &StepContext) -> Option<bool> {
    ctx.output(ActivityName::GenerateInspectionReport)
        .and_then(|output| output.as_inspection_report())
        .map(|report| report.requires_follow_up)
}

fn follow_up_required(ctx: &StepContext) -> bool {
    report_requires_follow_up(ctx).unwrap_or(false)
}

fn follow_up_not_required(ctx: &StepContext) -> bool {
    !follow_up_required(ctx)
}

fn scheduling_outcome(output: &ActivityOutput) -> Option<EarlyExit> {
    let scheduling = output.as_scheduling()?;
    if scheduling.success {
        return None;
    }
    Some(EarlyExit {
        status: InstanceStatus::Rescheduled,
        result: json!({
            "status": "rescheduled",
            "report": "Scheduling conflict - needs rescheduling",
            "reason": "Scheduling conflict",
        }),
    })
}

fn conclude(ctx: &StepContext) -> KResult<Terminal> {
    let report = ctx
        .output(ActivityName::GenerateInspectionReport)
        .and_then(|output| output.as_inspection_report())
        .ok_or_else(|| {
            ErrorCode::ExecutionException("inspection report missing from execution context")
        })?;

    let (compliant, violations) = if report.requires_follow_up {
        let follow_up = ctx
            .output(ActivityName::ScheduleFollowUp)
            .and_then(|output| output.as_follow_up())
            .ok_or_else(|| {
                ErrorCode::ExecutionException("follow-up result missing from execution context")
            })?;
        (follow_up.compliant, report.violations.clone())
    } else {
        let verification = ctx
            .output(ActivityName::VerifyCompliance)
            .and_then(|output| output.as_compliance_verification())
            .ok_or_else(|| {
                ErrorCode::ExecutionException(
                    "compliance verification missing from execution context",
                )
            })?;
        (verification.compliant, verification.violations.clone())
    };

    let status = if compliant {
        InstanceStatus::Compliant
    } else {
        InstanceStatus::Violated
    };

    Ok(Terminal {
        status,
        result: json!({
            "status": status.result_label(),
            "report": report.summary,
            "violations": violations,
            "inspectedAt": Utc::now().to_rfc3339(),
        }),
    })
}
