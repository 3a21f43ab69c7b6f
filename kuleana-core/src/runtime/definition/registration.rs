//! TVR registration: initial review, zoning verification, optional
//! NCUC processing, inspection scheduling, final approval. Rejection at
//! review, zoning or NCUC short-circuits straight to REJECTED.

use chrono::Utc;
use serde_json::json;

use kuleana_common::prelude::*;
use kuleana_common::{ActivityName, ActivityOutput, WorkflowKind};

use super::step::{days, hours, EarlyExit, ProcessDefinition, StepDef, Terminal};
use crate::model::InstanceStatus;
use crate::runtime::execution::StepContext;

pub static TVR_REGISTRATION: ProcessDefinition = ProcessDefinition {
    kind: WorkflowKind::TvrRegistration,
    fallback: InstanceStatus::Rejected,
    steps: &[
        StepDef {
            name: "INITIAL_REVIEW",
            delay: hours(2),
            activity: ActivityName::PerformInitialReview,
            condition: None,
            on_result: Some(review_outcome),
        },
        StepDef {
            name: "ZONING_CHECK",
            delay: days(1),
            activity: ActivityName::VerifyZoning,
            condition: None,
            on_result: Some(zoning_outcome),
        },
        StepDef {
            name: "NCUC_PROCESSING",
            delay: days(3),
            activity: ActivityName::ProcessNcuc,
            condition: Some(requires_ncuc),
            on_result: Some(ncuc_outcome),
        },
        StepDef {
            name: "INSPECTION_SCHEDULING",
            delay: days(2),
            activity: ActivityName::ScheduleInspection,
            condition: None,
            on_result: None,
        },
        StepDef {
            name: "FINAL_APPROVAL",
            delay: days(1),
            activity: ActivityName::FinalizeRegistration,
            condition: None,
            on_result: None,
        },
    ],
    finish: approve,
};

fn requires_ncuc(ctx: &StepContext) -> bool {
    ctx.input()
        .as_registration()
        .map(|application| application.requires_ncuc)
        .unwrap_or(false)
}

fn review_outcome(output: &ActivityOutput) -> Option<EarlyExit> {
    let review = output.as_initial_review()?;
    if review.approved {
        return None;
    }
    let reason = if review.reason.is_empty() {
        InlineStr::from("Application incomplete")
    } else {
        review.reason.clone()
    };
    Some(EarlyExit {
        status: InstanceStatus::Rejected,
        result: json!({ "status": "rejected", "reason": reason }),
    })
}

fn zoning_outcome(output: &ActivityOutput) -> Option<EarlyExit> {
    let zoning = output.as_zoning()?;
    if zoning.compliant {
        return None;
    }
    Some(EarlyExit {
        status: InstanceStatus::Rejected,
        result: json!({ "status": "rejected", "reason": "Zoning violation detected" }),
    })
}

fn ncuc_outcome(output: &ActivityOutput) -> Option<EarlyExit> {
    let ncuc = output.as_ncuc()?;
    if ncuc.approved {
        return None;
    }
    Some(EarlyExit {
        status: InstanceStatus::Rejected,
        result: json!({ "status": "rejected", "reason": "NCUC denied" }),
    })
}

fn approve(ctx: &StepContext) -> KResult<Terminal> {
    let approval = ctx
        .output(ActivityName::FinalizeRegistration)
        .and_then(|output| output.as_final_approval())
        .ok_or_else(|| {
            ErrorCode::ExecutionException("final approval result missing from execution context")
        })?;

    Ok(Terminal {
        status: InstanceStatus::Approved,
        result: json!({
            "status": "approved",
            "registrationId": approval.id,
            "approvedAt": Utc::now().to_rfc3339(),
        }),
    })
}
