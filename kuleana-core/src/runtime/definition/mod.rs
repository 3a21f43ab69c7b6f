mod appeal;
mod inspection;
mod investigation;
mod registration;
mod registry;
mod step;

pub use registry::DefinitionRegistry;
pub use step::{EarlyExit, ProcessDefinition, StepDef, Terminal};
