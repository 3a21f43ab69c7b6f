mod execution_service;
mod workflow_service;

pub use execution_service::ExecutionService;
pub use workflow_service::WorkflowService;
