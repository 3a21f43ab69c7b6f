mod exception;
mod metadata;
mod run;
mod utils;

pub use metadata::{
    ActivityError, ActivityName, ActivityOutput, Appeal, AppealDecision, AssessmentResult,
    Complaint, ComplianceNotice, ComplianceVerificationResult, DocumentReviewResult,
    EvidenceBundle, FinalApprovalResult, FollowUpResult, HearingSchedule, InitialReviewResult,
    InspectionAppointment, InspectionRecord, InspectionReport, InvestigationReport,
    LegalReviewResult, NcucResult, NotificationReceipt, OnSiteInspectionResult,
    RegistrationApplication, RetryPolicy, SchedulingResult, SiteVisitResult,
    ViolationDetermination, WorkflowInput, WorkflowKind, ZoningResult,
};
pub use run::StartProcessRequest;
pub use utils::{EnvUtils, SystemParameters};

pub mod prelude;

#[macro_use]
pub(crate) mod macros;
