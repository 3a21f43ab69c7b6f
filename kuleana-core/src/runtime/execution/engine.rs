use std::str::FromStr;

use chrono::Utc;
use dashmap::DashMap;
use tokio::task::JoinHandle;

use kuleana_common::prelude::*;
use kuleana_common::{StartProcessRequest, WorkflowKind};

use super::invoker::ActivityInvoker;
use super::step_context::StepContext;
use super::timer::{CancelSignal, DurableTimer, TimerOutcome};
use crate::config::EngineProperties;
use crate::dao::InstanceStore;
use crate::metrics::Monitors;
use crate::model::{HistoryEventKind, InstanceStatus, InstanceSummary, ProcessInstance};
use crate::runtime::definition::{ProcessDefinition, Terminal};
use crate::runtime::{ActivityRegistry, DefinitionRegistry};
use crate::utils::IdGenerator;

/// Top-level orchestrator: accepts start requests, creates instances in
/// the store, drives each instance through its definition as one
/// spawned continuation, and answers queries from the store.
///
/// Constructed once at startup and explicitly owned; the store, the
/// invoker and the per-instance cancellation signals all live inside
/// the engine rather than in process-global state.
pub struct WorkflowEngine {
    properties: EngineProperties,
    store: InstanceStore,
    invoker: ActivityInvoker,
    timer: DurableTimer,
    cancellations: DashMap<InlineStr, Arc<CancelSignal>>,
    continuations: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkflowEngine {
    pub fn new(properties: EngineProperties, activities: ActivityRegistry) -> Arc<Self> {
        let timer = DurableTimer::new(properties.timer_compression);
        let invoker = ActivityInvoker::new(activities, properties.retry_policy.clone(), timer);
        Arc::new(Self {
            properties,
            store: InstanceStore::new(),
            invoker,
            timer,
            cancellations: DashMap::new(),
            continuations: Mutex::new(Vec::new()),
        })
    }

    pub fn properties(&self) -> &EngineProperties {
        &self.properties
    }

    pub fn instance_count(&self) -> usize {
        self.store.len()
    }

    /// Validates the request, creates the instance with a STARTED
    /// history entry and schedules its continuation. Returns the new
    /// instance id immediately; no step has run yet when this returns.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self: &Arc<Self>, request: StartProcessRequest) -> KResult<InlineStr> {
        let kind = WorkflowKind::from_str(&request.workflow_type).map_err(|_| {
            Monitors::record_workflow_start_error(&request.workflow_type);
            ErrorCode::UnknownWorkflowType(format!(
                "unknown workflow type: {}",
                request.workflow_type
            ))
        })?;
        let input = kind.parse_input(&request.input)?;

        let workflow_id = IdGenerator::generate();
        let instance = ProcessInstance::new(workflow_id.clone(), kind, input);
        self.store.create(instance)?;

        let cancel = CancelSignal::new();
        self.cancellations.insert(workflow_id.clone(), cancel.clone());

        let engine = Arc::clone(self);
        let continuation_id = workflow_id.clone();
        let handle = tokio::spawn(async move {
            engine.run_to_completion(continuation_id, cancel).await;
        });
        {
            let mut continuations = self.continuations.lock();
            continuations.retain(|continuation| !continuation.is_finished());
            continuations.push(handle);
        }

        info!(
            "created workflow instance {} of type {}",
            workflow_id,
            kind.as_ref()
        );
        Monitors::record_workflow_start_success(kind.as_ref());
        Ok(workflow_id)
    }

    /// Snapshot of the full instance record, including history.
    pub fn get(&self, workflow_id: &str) -> KResult<ProcessInstance> {
        self.store.get(workflow_id).ok_or_else(|| {
            ErrorCode::NotFound(format!("workflow instance {} not found", workflow_id))
        })
    }

    /// Instance summaries in insertion order.
    pub fn list(&self) -> Vec<InstanceSummary> {
        self.store.list()
    }

    /// Requests cancellation. The instance's continuation observes the
    /// signal at its next suspension point (a pending delay resumes
    /// immediately) and transitions to CANCELLED; an in-flight activity
    /// call is never interrupted, keeping step side effects
    /// exactly-once.
    pub fn cancel(&self, workflow_id: &str) -> KResult<()> {
        let instance = self.get(workflow_id)?;
        if instance.status.is_terminal() {
            return fmt_err!(
                Conflict,
                "workflow instance {} is already in terminal status {}",
                workflow_id,
                instance.status.as_ref()
            );
        }
        if let Some(cancel) = self.cancellations.get(workflow_id) {
            cancel.cancel();
        }
        info!("cancellation requested for workflow instance {}", workflow_id);
        Ok(())
    }

    /// Awaits every spawned continuation. Part of the shutdown
    /// lifecycle; new starts issued concurrently with a drain are not
    /// waited for.
    pub async fn drain(&self) {
        let handles = {
            let mut continuations = self.continuations.lock();
            std::mem::take(&mut *continuations)
        };
        for handle in handles {
            let _ = handle.await;
        }
    }

    /// One instance's whole continuation: for each step, wait out the
    /// durable delay, invoke the activity, persist the result, then
    /// either exit early or fall through to the definition's terminal
    /// mapping. Exactly one step is in flight at any time.
    async fn run_to_completion(self: Arc<Self>, workflow_id: InlineStr, cancel: Arc<CancelSignal>) {
        let mut instance = match self.store.get(&workflow_id) {
            Some(instance) => instance,
            None => {
                error!("workflow instance {} vanished before execution", workflow_id);
                return;
            }
        };
        let definition = DefinitionRegistry::get(instance.workflow_type);
        let mut ctx = StepContext::new(instance.input.clone());

        for step in definition.steps {
            if cancel.is_cancelled() {
                self.finalize_cancelled(&mut instance);
                return;
            }
            if let Some(condition) = step.condition {
                if !condition(&ctx) {
                    debug!("skipping step {} for {}", step.name, instance.to_short_string());
                    continue;
                }
            }

            if self.timer.sleep(step.delay, &cancel).await == TimerOutcome::Cancelled {
                self.finalize_cancelled(&mut instance);
                return;
            }

            match self.invoker.invoke(step.activity, &ctx).await {
                Ok(output) => {
                    instance.record_event(
                        HistoryEventKind::StepCompleted,
                        format!("{} completed", step.name),
                    );
                    let early_exit = step.on_result.and_then(|decide| decide(&output));
                    ctx.record(step.activity, output);
                    self.store.update(instance.clone());

                    if let Some(exit) = early_exit {
                        self.finalize_completed(&mut instance, exit.status, exit.result);
                        return;
                    }
                }
                Err(failure) => {
                    self.finalize_failed(&mut instance, definition, step.name, &failure.to_string());
                    return;
                }
            }
        }

        match (definition.finish)(&ctx) {
            Ok(Terminal { status, result }) => {
                self.finalize_completed(&mut instance, status, result)
            }
            Err(e) => {
                self.finalize_failed(&mut instance, definition, "TERMINAL_MAPPING", &e.message());
            }
        }
    }

    fn finalize_completed(
        &self,
        instance: &mut ProcessInstance,
        status: InstanceStatus,
        result: serde_json::Value,
    ) {
        let end_time = Utc::now().timestamp_millis();
        instance.record_event(
            HistoryEventKind::Completed,
            format!(
                "{} completed with status {}",
                instance.workflow_type.as_ref(),
                status.as_ref()
            ),
        );
        instance.status = status;
        instance.result = Some(result);
        instance.end_time = Some(end_time);
        self.store.update(instance.clone());
        self.cancellations.remove(&instance.workflow_id);

        Monitors::record_workflow_completion(
            instance.workflow_type.as_ref(),
            status,
            end_time - instance.start_time,
        );
        info!(
            "workflow instance {} completed with status {}",
            instance.workflow_id,
            status.as_ref()
        );
    }

    /// Activity failure path: remaining steps are abandoned and the
    /// instance lands on the definition's fallback terminal status with
    /// the triggering error captured.
    fn finalize_failed(
        &self,
        instance: &mut ProcessInstance,
        definition: &ProcessDefinition,
        step_name: &str,
        reason: &str,
    ) {
        instance.record_event(
            HistoryEventKind::Failed,
            format!("{} failed: {}", step_name, reason),
        );
        instance.status = definition.fallback;
        instance.error = Some(InlineStr::from(reason));
        instance.result = Some(serde_json::json!({
            "status": definition.fallback.result_label(),
            "reason": reason,
        }));
        instance.end_time = Some(Utc::now().timestamp_millis());
        self.store.update(instance.clone());
        self.cancellations.remove(&instance.workflow_id);

        Monitors::record_workflow_failure(instance.workflow_type.as_ref(), reason);
        warn!(
            "workflow instance {} failed at {} and fell back to {}: {}",
            instance.workflow_id,
            step_name,
            definition.fallback.as_ref(),
            reason
        );
    }

    fn finalize_cancelled(&self, instance: &mut ProcessInstance) {
        instance.record_event(
            HistoryEventKind::Cancelled,
            "cancelled by operator request",
        );
        instance.status = InstanceStatus::Cancelled;
        instance.end_time = Some(Utc::now().timestamp_millis());
        self.store.update(instance.clone());
        self.cancellations.remove(&instance.workflow_id);

        Monitors::record_workflow_cancellation(instance.workflow_type.as_ref());
        info!("workflow instance {} cancelled", instance.workflow_id);
    }
}
