use crate::model::InstanceStatus;

/// Metrics recording hooks. Bodies are intentionally empty until a
/// metrics backend is wired in; call sites mark every point a backend
/// would need.
pub struct Monitors;

impl Monitors {
    pub fn record_workflow_start_success(_workflow_type: &str) {}

    pub fn record_workflow_start_error(_workflow_type: &str) {}

    pub fn record_workflow_completion(
        _workflow_type: &str,
        _status: InstanceStatus,
        _duration_ms: i64,
    ) {
    }

    pub fn record_workflow_failure(_workflow_type: &str, _reason: &str) {}

    pub fn record_workflow_cancellation(_workflow_type: &str) {}

    pub fn record_activity_execution(_activity: &str, _attempts: u32) {}

    pub fn record_activity_retry(_activity: &str, _attempt: u32) {}

    pub fn record_activity_retry_exhausted(_activity: &str) {}
}
