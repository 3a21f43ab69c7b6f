use enum_as_inner::EnumAsInner;
use serde::Serialize;
use strum_macros::{AsRefStr, EnumIter, EnumString};
use thiserror::Error;

use super::results::*;

/// Names of the activities the four process definitions invoke,
/// serialized with the names the control plane advertises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, EnumString, EnumIter)]
pub enum ActivityName {
    // TVR registration
    #[strum(serialize = "performInitialReview")]
    PerformInitialReview,
    #[strum(serialize = "verifyZoning")]
    VerifyZoning,
    #[strum(serialize = "processNCUC")]
    ProcessNcuc,
    #[strum(serialize = "scheduleInspection")]
    ScheduleInspection,
    #[strum(serialize = "finalizeRegistration")]
    FinalizeRegistration,

    // Complaint investigation
    #[strum(serialize = "performInitialAssessment")]
    PerformInitialAssessment,
    #[strum(serialize = "collectEvidence")]
    CollectEvidence,
    #[strum(serialize = "conductSiteVisit")]
    ConductSiteVisit,
    #[strum(serialize = "generateInvestigationReport")]
    GenerateInvestigationReport,
    #[strum(serialize = "determineViolations")]
    DetermineViolations,
    #[strum(serialize = "generateNotice")]
    GenerateNotice,

    // Violation appeal
    #[strum(serialize = "reviewAppealDocuments")]
    ReviewAppealDocuments,
    #[strum(serialize = "performLegalReview")]
    PerformLegalReview,
    #[strum(serialize = "scheduleHearing")]
    ScheduleHearing,
    #[strum(serialize = "makeAppealDecision")]
    MakeAppealDecision,
    #[strum(serialize = "notifyAppealDecision")]
    NotifyAppealDecision,

    // Annual inspection
    #[strum(serialize = "scheduleInspectionDate")]
    ScheduleInspectionDate,
    #[strum(serialize = "conductOnSiteInspection")]
    ConductOnSiteInspection,
    #[strum(serialize = "generateInspectionReport")]
    GenerateInspectionReport,
    #[strum(serialize = "scheduleFollowUp")]
    ScheduleFollowUp,
    #[strum(serialize = "verifyCompliance")]
    VerifyCompliance,
}

/// The typed result of one activity call. Branch predicates read the
/// just-produced variant; terminal mappings read accumulated variants
/// out of the execution context.
#[derive(Clone, Debug, Serialize, EnumAsInner)]
#[serde(untagged)]
pub enum ActivityOutput {
    InitialReview(InitialReviewResult),
    Zoning(ZoningResult),
    Ncuc(NcucResult),
    InspectionScheduling(InspectionAppointment),
    FinalApproval(FinalApprovalResult),
    Assessment(AssessmentResult),
    Evidence(EvidenceBundle),
    SiteVisit(SiteVisitResult),
    InvestigationReport(InvestigationReport),
    ViolationDetermination(ViolationDetermination),
    Notice(ComplianceNotice),
    DocumentReview(DocumentReviewResult),
    LegalReview(LegalReviewResult),
    Hearing(HearingSchedule),
    Decision(AppealDecision),
    Notification(NotificationReceipt),
    Scheduling(SchedulingResult),
    OnSiteInspection(OnSiteInspectionResult),
    InspectionReport(InspectionReport),
    FollowUp(FollowUpResult),
    ComplianceVerification(ComplianceVerificationResult),
}

/// Classified activity failures.
///
/// Validation failures are caller/input errors and must never be
/// retried; transient failures are retried per the invoker's policy
/// until the attempt budget runs out.
#[derive(Clone, Debug, Error)]
pub enum ActivityError {
    #[error("validation failure: {0}")]
    Validation(String),
    #[error("transient failure: {0}")]
    Transient(String),
}

impl ActivityError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ActivityError::Transient(_))
    }
}
