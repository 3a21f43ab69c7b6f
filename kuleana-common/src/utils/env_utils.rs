use std::env;

use strum_macros::AsRefStr;

use crate::prelude::*;

/// Environment parameters consumed at engine startup. Values are
/// passed through to the engine unchanged; the engine does not
/// interpret namespace/queue/address beyond reporting them.
#[derive(Clone, Copy, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemParameters {
    ComplianceNamespace,
    ComplianceTaskQueue,
    ComplianceAddress,
    Port,
    ComplianceTimerCompression,
}

pub struct EnvUtils;

impl EnvUtils {
    pub fn var(param: SystemParameters) -> Option<InlineStr> {
        env::var(param.as_ref()).ok().map(InlineStr::from)
    }

    pub fn var_or(param: SystemParameters, default: &str) -> InlineStr {
        Self::var(param).unwrap_or_else(|| InlineStr::from(default))
    }
}
