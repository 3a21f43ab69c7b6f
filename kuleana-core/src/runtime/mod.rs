mod activity;
mod definition;
mod execution;

pub use activity::{ActivityHandler, ActivityRegistry};
pub(crate) use definition::DefinitionRegistry;
pub use execution::{
    ActivityInvoker, CancelSignal, DurableTimer, StepContext, TimerOutcome, WorkflowEngine,
};
