use async_trait::async_trait;

use kuleana_common::{ActivityError, ActivityOutput};

use crate::runtime::execution::StepContext;

/// A named, potentially side-effecting external operation invoked by a
/// workflow step.
///
/// Handlers read what they need out of the execution context and return
/// a typed result or a classified failure. They are not assumed
/// idempotent — the built-in handlers mint timestamp-based identifiers
/// on every call — so the invoker calls a handler exactly once per
/// successful step execution.
#[async_trait]
pub trait ActivityHandler: Send + Sync {
    async fn execute(&self, ctx: &StepContext) -> Result<ActivityOutput, ActivityError>;
}
