//! Violation appeal: document review, legal review, hearing
//! scheduling, decision, notification. Invalid documentation exits
//! straight to UPHELD.

use chrono::Utc;
use serde_json::json;

use kuleana_common::prelude::*;
use kuleana_common::{ActivityName, ActivityOutput, WorkflowKind};

use super::step::{days, EarlyExit, ProcessDefinition, StepDef, Terminal};
use crate::model::InstanceStatus;
use crate::runtime::execution::StepContext;

pub static VIOLATION_APPEAL: ProcessDefinition = ProcessDefinition {
    kind: WorkflowKind::ViolationAppeal,
    fallback: InstanceStatus::Pending,
    steps: &[
        StepDef {
            name: "DOCUMENT_REVIEW",
            delay: days(3),
            activity: ActivityName::ReviewAppealDocuments,
            condition: None,
            on_result: Some(document_review_outcome),
        },
        StepDef {
            name: "LEGAL_REVIEW",
            delay: days(7),
            activity: ActivityName::PerformLegalReview,
            condition: None,
            on_result: None,
        },
        StepDef {
            name: "HEARING_SCHEDULING",
            delay: days(7),
            activity: ActivityName::ScheduleHearing,
            condition: None,
            on_result: None,
        },
        StepDef {
            name: "DECISION",
            delay: days(3),
            activity: ActivityName::MakeAppealDecision,
            condition: None,
            on_result: None,
        },
        StepDef {
            name: "NOTIFICATION",
            delay: days(1),
            activity: ActivityName::NotifyAppealDecision,
            condition: None,
            on_result: None,
        },
    ],
    finish: decide,
};

fn document_review_outcome(output: &ActivityOutput) -> Option<EarlyExit> {
    let review = output.as_document_review()?;
    if review.valid {
        return None;
    }
    Some(EarlyExit {
        status: InstanceStatus::Upheld,
        result: json!({
            "status": "upheld",
            "decision": "Invalid appeal documentation",
            "reason": "Documentation incomplete",
        }),
    })
}

fn decide(ctx: &StepContext) -> KResult<Terminal> {
    let decision = ctx
        .output(ActivityName::MakeAppealDecision)
        .and_then(|output| output.as_decision())
        .ok_or_else(|| {
            ErrorCode::ExecutionException("appeal decision missing from execution context")
        })?;

    let status = if decision.upheld {
        InstanceStatus::Upheld
    } else {
        InstanceStatus::Overturned
    };

    Ok(Terminal {
        status,
        result: json!({
            "status": status.result_label(),
            "decision": decision.reasoning,
            "decidedAt": Utc::now().to_rfc3339(),
        }),
    })
}
