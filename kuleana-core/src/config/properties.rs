use kuleana_common::prelude::*;
use kuleana_common::{EnvUtils, RetryPolicy, SystemParameters};

/// Engine configuration, resolved once at startup and handed to the
/// engine as plain data. Namespace, task queue and address are opaque
/// pass-through parameters reported by the control plane.
#[derive(Clone, Debug)]
pub struct EngineProperties {
    pub namespace: InlineStr,
    pub task_queue: InlineStr,
    pub address: InlineStr,
    pub port: u16,
    /// Divisor applied to every logical timer duration. `1` runs
    /// process delays at face value; demo deployments compress days
    /// into seconds with larger values.
    pub timer_compression: u32,
    pub retry_policy: RetryPolicy,
}

impl EngineProperties {
    pub fn from_env() -> KResult<Self> {
        Ok(Self {
            namespace: EnvUtils::var_or(SystemParameters::ComplianceNamespace, "default"),
            task_queue: EnvUtils::var_or(
                SystemParameters::ComplianceTaskQueue,
                "tvr-compliance-queue",
            ),
            address: EnvUtils::var_or(SystemParameters::ComplianceAddress, "127.0.0.1"),
            port: match EnvUtils::var(SystemParameters::Port) {
                Some(port) => port.parse::<u16>()?,
                None => 8080,
            },
            timer_compression: match EnvUtils::var(SystemParameters::ComplianceTimerCompression) {
                Some(compression) => compression.parse::<u32>()?,
                None => 1,
            },
            retry_policy: RetryPolicy::default(),
        })
    }
}

impl Default for EngineProperties {
    fn default() -> Self {
        Self {
            namespace: InlineStr::from("default"),
            task_queue: InlineStr::from("tvr-compliance-queue"),
            address: InlineStr::from("127.0.0.1"),
            port: 8080,
            timer_compression: 1,
            retry_policy: RetryPolicy::default(),
        }
    }
}
