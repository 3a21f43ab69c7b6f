use kuleana_common::prelude::*;
use kuleana_common::StartProcessRequest;

use crate::runtime::WorkflowEngine;

/// Lifecycle operations on workflow instances.
pub struct WorkflowService {
    engine: Arc<WorkflowEngine>,
}

impl WorkflowService {
    pub fn new(engine: Arc<WorkflowEngine>) -> Self {
        Self { engine }
    }

    /// Starts a new workflow instance for the request's process kind.
    ///
    /// Returns the id of the instance, which can be used for tracking;
    /// execution proceeds asynchronously.
    pub fn start_workflow(&self, request: StartProcessRequest) -> KResult<InlineStr> {
        self.engine.start(request)
    }

    /// Requests cancellation of a running instance. Fails with a
    /// conflict once the instance is terminal.
    pub fn cancel_workflow(&self, workflow_id: &str) -> KResult<()> {
        self.engine.cancel(workflow_id)
    }
}
