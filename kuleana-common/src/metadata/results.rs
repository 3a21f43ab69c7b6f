//! Result shapes returned by the compliance activities, one struct per
//! activity. These are the payloads that accumulate in a workflow's
//! execution context and feed branch predicates and terminal outcomes.

use serde::Serialize;

use crate::prelude::*;

// TVR registration

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialReviewResult {
    pub approved: bool,
    pub reason: InlineStr,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoningResult {
    pub compliant: bool,
    pub zoning_code: InlineStr,
    pub restrictions: Vec<InlineStr>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NcucResult {
    pub approved: bool,
    #[serde(rename = "ncucNumber")]
    pub ncuc_number: InlineStr,
    pub processing_time: InlineStr,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionAppointment {
    pub id: InlineStr,
    pub scheduled_date: InlineStr,
    pub inspector: InlineStr,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalApprovalResult {
    pub id: InlineStr,
    pub approved_at: InlineStr,
    pub registration_number: InlineStr,
}

// Complaint investigation

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub requires_investigation: bool,
    pub priority: i32,
    pub estimated_duration: InlineStr,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceBundle {
    pub photos: Vec<InlineStr>,
    pub documents: Vec<InlineStr>,
    pub witness_statements: Vec<InlineStr>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteVisitResult {
    pub visit_date: InlineStr,
    pub findings: InlineStr,
    pub violations_found: i32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestigationReport {
    pub report_id: InlineStr,
    pub summary: InlineStr,
    pub requires_follow_up: bool,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationDetermination {
    pub has_violations: bool,
    pub violation_types: Vec<InlineStr>,
    pub severity: InlineStr,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceNotice {
    pub notice_id: InlineStr,
    pub issued_date: InlineStr,
    pub compliance_deadline: InlineStr,
}

// Violation appeal

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReviewResult {
    pub valid: bool,
    pub documents_reviewed: i32,
    pub missing_documents: Vec<InlineStr>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalReviewResult {
    pub legal_basis: InlineStr,
    pub recommendation: InlineStr,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HearingSchedule {
    pub hearing_date: InlineStr,
    pub location: InlineStr,
    pub judge: InlineStr,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppealDecision {
    pub upheld: bool,
    pub reasoning: InlineStr,
    pub effective_date: InlineStr,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationReceipt {
    pub notification_sent: bool,
    pub recipients: Vec<InlineStr>,
    pub method: InlineStr,
}

// Annual inspection

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingResult {
    pub success: bool,
    pub scheduled_date: InlineStr,
    pub inspector: InlineStr,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnSiteInspectionResult {
    pub inspection_date: InlineStr,
    pub findings: InlineStr,
    pub violations_found: i32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionReport {
    pub report_id: InlineStr,
    pub summary: InlineStr,
    pub requires_follow_up: bool,
    pub violations: Vec<InlineStr>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpResult {
    pub follow_up_date: InlineStr,
    pub reason: InlineStr,
    /// Whether the property ended up compliant after follow-up. A
    /// scheduled follow-up implies open findings, so the built-in
    /// handler reports `false`.
    pub compliant: bool,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceVerificationResult {
    pub compliant: bool,
    pub violations: Vec<InlineStr>,
    pub next_inspection_date: InlineStr,
}
