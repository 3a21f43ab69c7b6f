mod engine;
mod invoker;
mod step_context;
mod timer;

pub use engine::WorkflowEngine;
pub use invoker::ActivityInvoker;
pub use step_context::StepContext;
pub use timer::{CancelSignal, DurableTimer, TimerOutcome};
