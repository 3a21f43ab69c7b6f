use dashmap::DashMap;

use kuleana_common::prelude::*;
use kuleana_common::ActivityName;

use super::appeal::{
    MakeAppealDecision, NotifyAppealDecision, PerformLegalReview, ReviewAppealDocuments,
    ScheduleHearing,
};
use super::handler::ActivityHandler;
use super::inspection::{
    ConductOnSiteInspection, GenerateInspectionReport, ScheduleFollowUp, ScheduleInspectionDate,
    VerifyCompliance,
};
use super::investigation::{
    CollectEvidence, ConductSiteVisit, DetermineViolations, GenerateInvestigationReport,
    GenerateNotice, PerformInitialAssessment,
};
use super::registration::{
    FinalizeRegistration, PerformInitialReview, ProcessNcuc, ScheduleInspection, VerifyZoning,
};

/// Maps activity names to handler instances.
///
/// `with_defaults` registers the built-in simulated handlers for all
/// four process families; `register` replaces a handler, which is how
/// deployments plug in real implementations and tests force specific
/// branches.
pub struct ActivityRegistry {
    handlers: DashMap<InlineStr, Arc<dyn ActivityHandler>>,
}

impl ActivityRegistry {
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let registry = Self::new();

        // TVR registration
        registry.register(ActivityName::PerformInitialReview, Arc::new(PerformInitialReview));
        registry.register(ActivityName::VerifyZoning, Arc::new(VerifyZoning));
        registry.register(ActivityName::ProcessNcuc, Arc::new(ProcessNcuc));
        registry.register(ActivityName::ScheduleInspection, Arc::new(ScheduleInspection));
        registry.register(ActivityName::FinalizeRegistration, Arc::new(FinalizeRegistration));

        // Complaint investigation
        registry.register(
            ActivityName::PerformInitialAssessment,
            Arc::new(PerformInitialAssessment),
        );
        registry.register(ActivityName::CollectEvidence, Arc::new(CollectEvidence));
        registry.register(ActivityName::ConductSiteVisit, Arc::new(ConductSiteVisit));
        registry.register(
            ActivityName::GenerateInvestigationReport,
            Arc::new(GenerateInvestigationReport),
        );
        registry.register(ActivityName::DetermineViolations, Arc::new(DetermineViolations));
        registry.register(ActivityName::GenerateNotice, Arc::new(GenerateNotice));

        // Violation appeal
        registry.register(
            ActivityName::ReviewAppealDocuments,
            Arc::new(ReviewAppealDocuments),
        );
        registry.register(ActivityName::PerformLegalReview, Arc::new(PerformLegalReview));
        registry.register(ActivityName::ScheduleHearing, Arc::new(ScheduleHearing));
        registry.register(ActivityName::MakeAppealDecision, Arc::new(MakeAppealDecision));
        registry.register(
            ActivityName::NotifyAppealDecision,
            Arc::new(NotifyAppealDecision),
        );

        // Annual inspection
        registry.register(
            ActivityName::ScheduleInspectionDate,
            Arc::new(ScheduleInspectionDate),
        );
        registry.register(
            ActivityName::ConductOnSiteInspection,
            Arc::new(ConductOnSiteInspection),
        );
        registry.register(
            ActivityName::GenerateInspectionReport,
            Arc::new(GenerateInspectionReport),
        );
        registry.register(ActivityName::ScheduleFollowUp, Arc::new(ScheduleFollowUp));
        registry.register(ActivityName::VerifyCompliance, Arc::new(VerifyCompliance));

        registry
    }

    pub fn register(&self, activity: ActivityName, handler: Arc<dyn ActivityHandler>) {
        self.handlers
            .insert(InlineStr::from(activity.as_ref()), handler);
    }

    pub fn get(&self, activity: ActivityName) -> Option<Arc<dyn ActivityHandler>> {
        self.handlers
            .get(activity.as_ref())
            .map(|handler| handler.value().clone())
    }
}

impl Default for ActivityRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
