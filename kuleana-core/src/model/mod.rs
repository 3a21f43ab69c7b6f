mod history;
mod instance;
mod summary;

pub use history::{HistoryEvent, HistoryEventKind};
pub use instance::{InstanceStatus, ProcessInstance};
pub use summary::InstanceSummary;
