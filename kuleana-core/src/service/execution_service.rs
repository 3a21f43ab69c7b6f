use kuleana_common::prelude::*;

use crate::model::{InstanceSummary, ProcessInstance};
use crate::runtime::WorkflowEngine;

/// Read-side queries over workflow executions. Queries go straight to
/// the store and never wait on in-flight execution.
pub struct ExecutionService {
    engine: Arc<WorkflowEngine>,
}

impl ExecutionService {
    pub fn new(engine: Arc<WorkflowEngine>) -> Self {
        Self { engine }
    }

    /// Full instance record by id, including history.
    pub fn get_execution_status(&self, workflow_id: &str) -> KResult<ProcessInstance> {
        self.engine.get(workflow_id)
    }

    /// Instance summaries in insertion order.
    pub fn list_executions(&self) -> Vec<InstanceSummary> {
        self.engine.list()
    }
}
