use once_cell::sync::Lazy;

use kuleana_common::prelude::*;
use kuleana_common::WorkflowKind;

use super::appeal::VIOLATION_APPEAL;
use super::inspection::ANNUAL_INSPECTION;
use super::investigation::COMPLAINT_INVESTIGATION;
use super::registration::TVR_REGISTRATION;
use super::step::ProcessDefinition;

static DEFINITIONS: Lazy<HashMap<WorkflowKind, &'static ProcessDefinition>> = Lazy::new(|| {
    let mut definitions: HashMap<WorkflowKind, &'static ProcessDefinition> = HashMap::new();
    for definition in [
        &TVR_REGISTRATION,
        &COMPLAINT_INVESTIGATION,
        &VIOLATION_APPEAL,
        &ANNUAL_INSPECTION,
    ] {
        definitions.insert(definition.kind, definition);
    }
    definitions
});

/// Binds each workflow kind to exactly one process definition. The
/// kind enumeration is closed, so lookups cannot miss.
pub struct DefinitionRegistry;

impl DefinitionRegistry {
    pub fn get(kind: WorkflowKind) -> &'static ProcessDefinition {
        DEFINITIONS
            .get(&kind)
            .copied()
            .expect("every workflow kind has a registered definition")
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_kind_resolves_to_its_definition() {
        for kind in WorkflowKind::iter() {
            assert_eq!(DefinitionRegistry::get(kind).kind, kind);
        }
    }
}
