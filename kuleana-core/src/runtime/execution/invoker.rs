use kuleana_common::prelude::*;
use kuleana_common::{ActivityError, ActivityName, ActivityOutput, RetryPolicy};

use super::step_context::StepContext;
use super::timer::DurableTimer;
use crate::metrics::Monitors;
use crate::runtime::activity::ActivityRegistry;

/// Invokes named activities with classified-failure and retry
/// semantics.
///
/// Validation failures propagate immediately. Transient failures are
/// retried with the policy's backoff, served as logical delays by the
/// durable timer; once the attempt budget is spent the failure is
/// handed back as final, which makes it non-retryable for the step.
pub struct ActivityInvoker {
    registry: ActivityRegistry,
    policy: RetryPolicy,
    timer: DurableTimer,
}

impl ActivityInvoker {
    pub fn new(registry: ActivityRegistry, policy: RetryPolicy, timer: DurableTimer) -> Self {
        Self {
            registry,
            policy,
            timer,
        }
    }

    pub async fn invoke(
        &self,
        activity: ActivityName,
        ctx: &StepContext,
    ) -> Result<ActivityOutput, ActivityError> {
        let handler = self.registry.get(activity).ok_or_else(|| {
            ActivityError::Validation(format!(
                "no handler registered for activity {}",
                activity.as_ref()
            ))
        })?;

        let mut attempt = 1u32;
        loop {
            match handler.execute(ctx).await {
                Ok(output) => {
                    Monitors::record_activity_execution(activity.as_ref(), attempt);
                    return Ok(output);
                }
                Err(failure @ ActivityError::Transient(_)) => {
                    if attempt >= self.policy.max_attempts {
                        Monitors::record_activity_retry_exhausted(activity.as_ref());
                        return Err(ActivityError::Transient(format!(
                            "retry budget exhausted after {} attempts: {}",
                            attempt, failure
                        )));
                    }
                    let backoff = self.policy.delay(attempt);
                    warn!(
                        "activity {} failed transiently on attempt {}, retrying in {:?}: {}",
                        activity.as_ref(),
                        attempt,
                        backoff,
                        failure
                    );
                    Monitors::record_activity_retry(activity.as_ref(), attempt);
                    self.timer.delay(backoff).await;
                    attempt += 1;
                }
                Err(failure) => return Err(failure),
            }
        }
    }
}
