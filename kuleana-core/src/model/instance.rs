use chrono::Utc;
use serde::Serialize;
use strum_macros::AsRefStr;

use kuleana_common::prelude::*;
use kuleana_common::{WorkflowInput, WorkflowKind};

use super::{HistoryEvent, HistoryEventKind};

/// One execution of a process definition.
///
/// Created only by the engine's start operation and mutated only by the
/// continuation that owns it; readers always see a complete snapshot
/// through the store.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInstance {
    pub workflow_id: InlineStr,
    pub workflow_type: WorkflowKind,
    pub status: InstanceStatus,
    pub input: WorkflowInput,
    /// Opaque outcome payload, present only in terminal states.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Present only when the terminal outcome was failure-driven.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<InlineStr>,
    pub history: Vec<HistoryEvent>,
    /// Epoch milliseconds.
    pub start_time: i64,
    /// Set exactly once, on the terminal transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
}

impl ProcessInstance {
    pub fn new(workflow_id: InlineStr, workflow_type: WorkflowKind, input: WorkflowInput) -> Self {
        let mut instance = Self {
            workflow_id,
            workflow_type,
            status: InstanceStatus::Running,
            input,
            result: None,
            error: None,
            history: Vec::new(),
            start_time: Utc::now().timestamp_millis(),
            end_time: None,
        };
        instance.record_event(
            HistoryEventKind::Started,
            format!("Started {}", workflow_type.as_ref()),
        );
        instance
    }

    /// Appends a history event. Timestamps must be strictly increasing,
    /// so appends landing within the same millisecond are nudged past
    /// the previous entry.
    pub fn record_event(&mut self, kind: HistoryEventKind, details: impl Into<InlineStr>) {
        let now = Utc::now().timestamp_millis();
        let timestamp = match self.history.last() {
            Some(last) if now <= last.timestamp => last.timestamp + 1,
            _ => now,
        };
        self.history.push(HistoryEvent {
            timestamp,
            kind,
            details: details.into(),
        });
    }

    pub fn to_short_string(&self) -> String {
        format!("{}/{}", self.workflow_type.as_ref(), self.workflow_id)
    }
}

/// Instance status. `Running` is the only non-terminal status; every
/// other value is final and never transitions again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, Serialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceStatus {
    Running,
    Approved,
    Rejected,
    Compliant,
    Violated,
    Upheld,
    Overturned,
    Rescheduled,
    Pending,
    Cancelled,
}

impl InstanceStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, InstanceStatus::Running)
    }

    /// Lowercase label used inside result payloads, where the original
    /// control plane reported e.g. `{"status": "approved"}`.
    pub fn result_label(&self) -> &'static str {
        match self {
            InstanceStatus::Running => "running",
            InstanceStatus::Approved => "approved",
            InstanceStatus::Rejected => "rejected",
            InstanceStatus::Compliant => "compliant",
            InstanceStatus::Violated => "violated",
            InstanceStatus::Upheld => "upheld",
            InstanceStatus::Overturned => "overturned",
            InstanceStatus::Rescheduled => "rescheduled",
            InstanceStatus::Pending => "pending",
            InstanceStatus::Cancelled => "cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuleana_common::RegistrationApplication;

    fn sample_instance() -> ProcessInstance {
        ProcessInstance::new(
            InlineStr::from("wf-test"),
            WorkflowKind::TvrRegistration,
            WorkflowInput::Registration(RegistrationApplication {
                application_id: InlineStr::from("APP-1"),
                property_id: InlineStr::from("P-1"),
                applicant_name: InlineStr::from("Jane"),
                requires_ncuc: false,
            }),
        )
    }

    #[test]
    fn history_timestamps_strictly_increase() {
        let mut instance = sample_instance();
        for i in 0..5 {
            instance.record_event(HistoryEventKind::StepCompleted, format!("step {}", i));
        }
        for pair in instance.history.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
    }

    #[test]
    fn only_running_is_non_terminal() {
        assert!(!InstanceStatus::Running.is_terminal());
        assert!(InstanceStatus::Approved.is_terminal());
        assert!(InstanceStatus::Cancelled.is_terminal());
        assert!(InstanceStatus::Pending.is_terminal());
    }
}
