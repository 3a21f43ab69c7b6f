use enum_as_inner::EnumAsInner;
use serde::Serialize;

use crate::prelude::*;

/// The typed input payload of a workflow instance, tagged by process
/// kind. Parsed and validated once at the engine boundary; steps only
/// ever see the typed form.
#[derive(Clone, Debug, Serialize, EnumAsInner)]
#[serde(untagged)]
pub enum WorkflowInput {
    Registration(RegistrationApplication),
    Complaint(Complaint),
    Appeal(Appeal),
    Inspection(InspectionRecord),
}

/// A short-term-rental registration application.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationApplication {
    pub application_id: InlineStr,
    /// May arrive empty; initial review rejects applications without it.
    pub property_id: InlineStr,
    /// May arrive empty; initial review rejects applications without it.
    pub applicant_name: InlineStr,
    /// Whether the property needs a nonconforming-use certificate.
    #[serde(rename = "requiresNCUC")]
    pub requires_ncuc: bool,
}

impl TryFrom<&serde_json::Value> for RegistrationApplication {
    type Error = ErrorCode;
    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        Ok(Self {
            application_id: value
                .get("applicationId")
                .and_then(|x| x.as_str())
                .ok_or_else(|| ErrorCode::IllegalArgument("applicationId not found"))?
                .trim()
                .into(),
            property_id: value
                .get("propertyId")
                .and_then(|x| x.as_str())
                .unwrap_or("")
                .trim()
                .into(),
            applicant_name: value
                .get("applicantName")
                .and_then(|x| x.as_str())
                .unwrap_or("")
                .trim()
                .into(),
            requires_ncuc: value
                .get("requiresNCUC")
                .and_then(|x| x.as_bool())
                .unwrap_or(false),
        })
    }
}

/// A complaint filed against a property.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub complaint_id: InlineStr,
    pub priority: i32,
}

impl TryFrom<&serde_json::Value> for Complaint {
    type Error = ErrorCode;
    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        Ok(Self {
            complaint_id: value
                .get("complaintId")
                .and_then(|x| x.as_str())
                .ok_or_else(|| ErrorCode::IllegalArgument("complaintId not found"))?
                .trim()
                .into(),
            priority: value
                .get("priority")
                .unwrap_or(&serde_json::json!(0))
                .as_i64()
                .ok_or_else(|| ErrorCode::IllegalArgument("priority invalid"))?
                as i32,
        })
    }
}

/// An appeal against an issued violation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appeal {
    pub appeal_id: InlineStr,
}

impl TryFrom<&serde_json::Value> for Appeal {
    type Error = ErrorCode;
    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        Ok(Self {
            appeal_id: value
                .get("appealId")
                .and_then(|x| x.as_str())
                .ok_or_else(|| ErrorCode::IllegalArgument("appealId not found"))?
                .trim()
                .into(),
        })
    }
}

/// A scheduled annual inspection of a registered property.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionRecord {
    pub inspection_id: InlineStr,
    pub property_id: InlineStr,
}

impl TryFrom<&serde_json::Value> for InspectionRecord {
    type Error = ErrorCode;
    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        Ok(Self {
            inspection_id: value
                .get("inspectionId")
                .and_then(|x| x.as_str())
                .ok_or_else(|| ErrorCode::IllegalArgument("inspectionId not found"))?
                .trim()
                .into(),
            property_id: value
                .get("propertyId")
                .and_then(|x| x.as_str())
                .unwrap_or("")
                .trim()
                .into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_requires_an_id() {
        let value = serde_json::json!({ "propertyId": "P-1" });
        assert!(RegistrationApplication::try_from(&value).is_err());
    }

    #[test]
    fn missing_optional_fields_parse_as_empty() {
        let value = serde_json::json!({ "applicationId": "APP-1" });
        let application = RegistrationApplication::try_from(&value).unwrap();
        assert_eq!(application.application_id, "APP-1");
        assert!(application.property_id.is_empty());
        assert!(application.applicant_name.is_empty());
        assert!(!application.requires_ncuc);
    }
}
