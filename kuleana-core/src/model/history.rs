use serde::Serialize;
use strum_macros::AsRefStr;

use kuleana_common::prelude::*;

/// An immutable record of a significant transition in an instance's
/// lifecycle. History is append-only; the instance enforces strictly
/// increasing timestamps at append time.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    /// Epoch milliseconds.
    pub timestamp: i64,
    #[serde(rename = "event")]
    pub kind: HistoryEventKind,
    pub details: InlineStr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, Serialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryEventKind {
    Started,
    StepCompleted,
    Completed,
    Failed,
    Cancelled,
}
