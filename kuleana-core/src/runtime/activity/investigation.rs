//! Built-in handlers for the complaint investigation activities.

use async_trait::async_trait;
use chrono::{Duration, Utc};

use kuleana_common::prelude::*;
use kuleana_common::{
    ActivityError, ActivityName, ActivityOutput, AssessmentResult, ComplianceNotice,
    EvidenceBundle, InvestigationReport, SiteVisitResult, ViolationDetermination,
};

use super::handler::ActivityHandler;
use crate::runtime::execution::StepContext;

pub struct PerformInitialAssessment;

#[async_trait]
impl ActivityHandler for PerformInitialAssessment {
    async fn execute(&self, ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        let complaint = ctx.complaint()?;
        debug!(
            "performing initial assessment for complaint: {}",
            complaint.complaint_id
        );

        Ok(ActivityOutput::Assessment(AssessmentResult {
            requires_investigation: true,
            priority: complaint.priority,
            estimated_duration: InlineStr::from("5-7 days"),
        }))
    }
}

pub struct CollectEvidence;

#[async_trait]
impl ActivityHandler for CollectEvidence {
    async fn execute(&self, ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        let complaint = ctx.complaint()?;
        debug!("collecting evidence for complaint: {}", complaint.complaint_id);

        Ok(ActivityOutput::Evidence(EvidenceBundle {
            photos: vec![InlineStr::from("photo1.jpg"), InlineStr::from("photo2.jpg")],
            documents: vec![InlineStr::from("doc1.pdf")],
            witness_statements: Vec::new(),
        }))
    }
}

pub struct ConductSiteVisit;

#[async_trait]
impl ActivityHandler for ConductSiteVisit {
    async fn execute(&self, ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        let complaint = ctx.complaint()?;
        ctx.require(ActivityName::CollectEvidence)?;
        debug!(
            "conducting site visit for complaint: {}",
            complaint.complaint_id
        );

        Ok(ActivityOutput::SiteVisit(SiteVisitResult {
            visit_date: Utc::now().to_rfc3339().into(),
            findings: InlineStr::from("Observations noted during site visit"),
            violations_found: 2,
        }))
    }
}

pub struct GenerateInvestigationReport;

#[async_trait]
impl ActivityHandler for GenerateInvestigationReport {
    async fn execute(&self, ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        let complaint = ctx.complaint()?;
        ctx.require(ActivityName::CollectEvidence)?;
        ctx.require(ActivityName::ConductSiteVisit)?;
        debug!(
            "generating investigation report for complaint: {}",
            complaint.complaint_id
        );

        Ok(ActivityOutput::InvestigationReport(InvestigationReport {
            report_id: format!("RPT-{}", Utc::now().timestamp_millis()).into(),
            summary: InlineStr::from("Investigation completed with findings"),
            requires_follow_up: true,
        }))
    }
}

pub struct DetermineViolations;

#[async_trait]
impl ActivityHandler for DetermineViolations {
    async fn execute(&self, ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        let report = ctx
            .require(ActivityName::GenerateInvestigationReport)?
            .as_investigation_report()
            .ok_or_else(|| {
                ActivityError::Validation("investigation report payload malformed".to_string())
            })?;
        debug!("determining violations based on report: {}", report.report_id);

        Ok(ActivityOutput::ViolationDetermination(ViolationDetermination {
            has_violations: true,
            violation_types: vec![
                InlineStr::from("Noise violation"),
                InlineStr::from("Occupancy violation"),
            ],
            severity: InlineStr::from("Medium"),
        }))
    }
}

pub struct GenerateNotice;

#[async_trait]
impl ActivityHandler for GenerateNotice {
    async fn execute(&self, ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        let complaint = ctx.complaint()?;
        ctx.require(ActivityName::DetermineViolations)?;
        debug!("generating notice for complaint: {}", complaint.complaint_id);

        Ok(ActivityOutput::Notice(ComplianceNotice {
            notice_id: format!("NOTICE-{}", Utc::now().timestamp_millis()).into(),
            issued_date: Utc::now().to_rfc3339().into(),
            compliance_deadline: (Utc::now() + Duration::days(30)).to_rfc3339().into(),
        }))
    }
}
