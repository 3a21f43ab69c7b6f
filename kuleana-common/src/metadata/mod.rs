mod activity;
mod records;
mod results;
mod retry_policy;
mod workflow_kind;

pub use activity::{ActivityError, ActivityName, ActivityOutput};
pub use records::{Appeal, Complaint, InspectionRecord, RegistrationApplication, WorkflowInput};
pub use results::{
    AppealDecision, AssessmentResult, ComplianceNotice, ComplianceVerificationResult,
    DocumentReviewResult, EvidenceBundle, FinalApprovalResult, FollowUpResult, HearingSchedule,
    InitialReviewResult, InspectionAppointment, InspectionReport, InvestigationReport,
    LegalReviewResult, NcucResult, NotificationReceipt, OnSiteInspectionResult, SchedulingResult,
    SiteVisitResult, ViolationDetermination, ZoningResult,
};
pub use retry_policy::RetryPolicy;
pub use workflow_kind::WorkflowKind;
