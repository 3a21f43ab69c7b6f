use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use kuleana_common::prelude::*;

use crate::model::{InstanceSummary, ProcessInstance};

/// In-memory store holding the canonical state of every workflow
/// instance, keyed by instance id.
///
/// Owned by the engine and constructed with it; there is no ambient
/// global map. Updates replace the whole instance record, so a reader
/// never observes a partially-applied mutation. No cross-instance
/// transactions exist or are needed.
pub struct InstanceStore {
    instances: DashMap<InlineStr, ProcessInstance>,
    /// Ids in creation order, so list results are stably ordered.
    insertion_order: Mutex<Vec<InlineStr>>,
}

impl InstanceStore {
    pub fn new() -> Self {
        Self {
            instances: DashMap::new(),
            insertion_order: Mutex::new(Vec::new()),
        }
    }

    pub fn create(&self, instance: ProcessInstance) -> KResult<()> {
        let workflow_id = instance.workflow_id.clone();
        // the entry guard is released before the order index is locked,
        // so create and list can never wait on each other
        match self.instances.entry(workflow_id.clone()) {
            Entry::Occupied(_) => {
                return fmt_err!(Conflict, "workflow instance {} already exists", workflow_id);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(instance);
            }
        }
        self.insertion_order.lock().push(workflow_id);
        Ok(())
    }

    pub fn get(&self, workflow_id: &str) -> Option<ProcessInstance> {
        self.instances.get(workflow_id).map(|x| x.clone())
    }

    /// Replaces the full instance state. The continuation that owns the
    /// instance is the only writer, so a plain insert is a safe
    /// last-write-wins here.
    pub fn update(&self, instance: ProcessInstance) {
        self.instances.insert(instance.workflow_id.clone(), instance);
    }

    pub fn list(&self) -> Vec<InstanceSummary> {
        let order = self.insertion_order.lock();
        order
            .iter()
            .filter_map(|workflow_id| self.instances.get(workflow_id))
            .map(|instance| InstanceSummary::from(&*instance))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl Default for InstanceStore {
    fn default() -> Self {
        Self::new()
    }
}
