use serde::Serialize;
use strum_macros::{AsRefStr, EnumIter, EnumString};

use super::records::{Appeal, Complaint, InspectionRecord, RegistrationApplication};
use super::WorkflowInput;
use crate::prelude::*;

/// The closed set of compliance processes the engine knows how to run.
///
/// Process kinds are matched against the wire names carried by start
/// requests; anything outside this enumeration is rejected before an
/// instance is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, EnumString, EnumIter, Serialize)]
pub enum WorkflowKind {
    /// Short-term (transient vacation rental) registration.
    #[strum(serialize = "TVRRegistrationWorkflow")]
    #[serde(rename = "TVRRegistrationWorkflow")]
    TvrRegistration,
    /// Investigation of a filed complaint against a property.
    #[strum(serialize = "ComplaintInvestigationWorkflow")]
    #[serde(rename = "ComplaintInvestigationWorkflow")]
    ComplaintInvestigation,
    /// Appeal against an issued violation.
    #[strum(serialize = "ViolationAppealWorkflow")]
    #[serde(rename = "ViolationAppealWorkflow")]
    ViolationAppeal,
    /// Recurring annual inspection of a registered property.
    #[strum(serialize = "AnnualInspectionWorkflow")]
    #[serde(rename = "AnnualInspectionWorkflow")]
    AnnualInspection,
}

impl WorkflowKind {
    /// Validates and types a raw input payload for this process kind.
    ///
    /// Runs at the engine boundary, before any step is scheduled.
    pub fn parse_input(&self, input: &serde_json::Value) -> KResult<WorkflowInput> {
        match self {
            WorkflowKind::TvrRegistration => Ok(WorkflowInput::Registration(
                RegistrationApplication::try_from(input)?,
            )),
            WorkflowKind::ComplaintInvestigation => {
                Ok(WorkflowInput::Complaint(Complaint::try_from(input)?))
            }
            WorkflowKind::ViolationAppeal => Ok(WorkflowInput::Appeal(Appeal::try_from(input)?)),
            WorkflowKind::AnnualInspection => Ok(WorkflowInput::Inspection(
                InspectionRecord::try_from(input)?,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!(
            WorkflowKind::from_str("TVRRegistrationWorkflow").unwrap(),
            WorkflowKind::TvrRegistration
        );
        assert_eq!(
            WorkflowKind::from_str("AnnualInspectionWorkflow").unwrap(),
            WorkflowKind::AnnualInspection
        );
        assert!(WorkflowKind::from_str("NoSuchWorkflow").is_err());
    }

    #[test]
    fn typed_input_follows_the_kind() {
        let input = serde_json::json!({ "complaintId": "COMP-9", "priority": 2 });
        let parsed = WorkflowKind::ComplaintInvestigation
            .parse_input(&input)
            .unwrap();
        let complaint = parsed.as_complaint().unwrap();
        assert_eq!(complaint.complaint_id, "COMP-9");
        assert_eq!(complaint.priority, 2);
    }
}
