use std::time::Duration;

use kuleana_common::prelude::*;
use kuleana_common::{ActivityName, ActivityOutput, WorkflowKind};

use crate::model::InstanceStatus;
use crate::runtime::execution::StepContext;

/// One step of a process definition: a durable delay followed by an
/// activity invocation, with an optional entry condition and an
/// optional early-exit mapping over the just-produced result.
pub struct StepDef {
    pub name: &'static str,
    /// Logical duration of the step's delay; wall-clock behavior is the
    /// timer's concern.
    pub delay: Duration,
    pub activity: ActivityName,
    /// Entry condition over accumulated context. A false condition
    /// skips the step entirely (no delay, no activity, no history).
    pub condition: Option<fn(&StepContext) -> bool>,
    /// Evaluated over the step's own result only — no lookahead.
    /// Returning an exit short-circuits the remaining steps.
    pub on_result: Option<fn(&ActivityOutput) -> Option<EarlyExit>>,
}

/// A terminal outcome taken before the last modeled step.
pub struct EarlyExit {
    pub status: InstanceStatus,
    pub result: serde_json::Value,
}

/// The terminal outcome produced after the final step.
pub struct Terminal {
    pub status: InstanceStatus,
    pub result: serde_json::Value,
}

/// A deterministic, mostly-linear state machine for one process kind.
/// Definitions are static and immutable; every instance of a kind runs
/// the same steps.
pub struct ProcessDefinition {
    pub kind: WorkflowKind,
    pub steps: &'static [StepDef],
    /// Terminal status taken when a step's activity fails.
    pub fallback: InstanceStatus,
    /// Maps the accumulated context to the terminal outcome once the
    /// last step has run.
    pub finish: fn(&StepContext) -> KResult<Terminal>,
}

pub(super) const fn hours(n: u64) -> Duration {
    Duration::from_secs(n * 60 * 60)
}

pub(super) const fn days(n: u64) -> Duration {
    Duration::from_secs(n * 24 * 60 * 60)
}
