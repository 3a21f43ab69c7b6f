mod config;
mod dao;
mod metrics;
mod model;
mod runtime;
mod service;
mod utils;

pub use config::EngineProperties;
pub use dao::InstanceStore;
pub use model::{
    HistoryEvent, HistoryEventKind, InstanceStatus, InstanceSummary, ProcessInstance,
};
pub use runtime::{
    ActivityHandler, ActivityInvoker, ActivityRegistry, CancelSignal, DurableTimer, StepContext,
    TimerOutcome, WorkflowEngine,
};
pub use service::{ExecutionService, WorkflowService};
pub use utils::IdGenerator;
