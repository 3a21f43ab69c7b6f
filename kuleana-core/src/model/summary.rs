use serde::Serialize;

use kuleana_common::prelude::*;
use kuleana_common::{WorkflowInput, WorkflowKind};

use super::{InstanceStatus, ProcessInstance};

/// The trimmed instance view returned by list queries: identity, kind,
/// status and timing, without the history tail.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceSummary {
    pub workflow_id: InlineStr,
    pub workflow_type: WorkflowKind,
    pub status: InstanceStatus,
    pub start_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    pub input: WorkflowInput,
}

impl From<&ProcessInstance> for InstanceSummary {
    fn from(instance: &ProcessInstance) -> Self {
        Self {
            workflow_id: instance.workflow_id.clone(),
            workflow_type: instance.workflow_type,
            status: instance.status,
            start_time: instance.start_time,
            end_time: instance.end_time,
            input: instance.input.clone(),
        }
    }
}
