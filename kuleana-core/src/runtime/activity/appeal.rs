//! Built-in handlers for the violation appeal activities.

use async_trait::async_trait;
use chrono::{Duration, Utc};

use kuleana_common::prelude::*;
use kuleana_common::{
    ActivityError, ActivityName, ActivityOutput, AppealDecision, DocumentReviewResult,
    HearingSchedule, LegalReviewResult, NotificationReceipt,
};

use super::handler::ActivityHandler;
use crate::runtime::execution::StepContext;

pub struct ReviewAppealDocuments;

#[async_trait]
impl ActivityHandler for ReviewAppealDocuments {
    async fn execute(&self, ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        let appeal = ctx.appeal()?;
        debug!("reviewing appeal documents for appeal: {}", appeal.appeal_id);

        Ok(ActivityOutput::DocumentReview(DocumentReviewResult {
            valid: true,
            documents_reviewed: 5,
            missing_documents: Vec::new(),
        }))
    }
}

pub struct PerformLegalReview;

#[async_trait]
impl ActivityHandler for PerformLegalReview {
    async fn execute(&self, ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        let appeal = ctx.appeal()?;
        ctx.require(ActivityName::ReviewAppealDocuments)?;
        debug!("performing legal review for appeal: {}", appeal.appeal_id);

        Ok(ActivityOutput::LegalReview(LegalReviewResult {
            legal_basis: InlineStr::from("Valid legal grounds for appeal"),
            recommendation: InlineStr::from("Proceed with hearing"),
        }))
    }
}

pub struct ScheduleHearing;

#[async_trait]
impl ActivityHandler for ScheduleHearing {
    async fn execute(&self, ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        let appeal = ctx.appeal()?;
        ctx.require(ActivityName::PerformLegalReview)?;
        debug!("scheduling hearing for appeal: {}", appeal.appeal_id);

        Ok(ActivityOutput::Hearing(HearingSchedule {
            hearing_date: (Utc::now() + Duration::days(14)).to_rfc3339().into(),
            location: InlineStr::from("County Courthouse"),
            judge: InlineStr::from("Judge Smith"),
        }))
    }
}

pub struct MakeAppealDecision;

#[async_trait]
impl ActivityHandler for MakeAppealDecision {
    async fn execute(&self, ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        let appeal = ctx.appeal()?;
        ctx.require(ActivityName::ScheduleHearing)?;
        debug!("making appeal decision for appeal: {}", appeal.appeal_id);

        Ok(ActivityOutput::Decision(AppealDecision {
            upheld: false,
            reasoning: InlineStr::from("Appeal granted based on new evidence"),
            effective_date: Utc::now().to_rfc3339().into(),
        }))
    }
}

pub struct NotifyAppealDecision;

#[async_trait]
impl ActivityHandler for NotifyAppealDecision {
    async fn execute(&self, ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        let appeal = ctx.appeal()?;
        ctx.require(ActivityName::MakeAppealDecision)?;
        debug!("notifying parties of appeal decision: {}", appeal.appeal_id);

        Ok(ActivityOutput::Notification(NotificationReceipt {
            notification_sent: true,
            recipients: vec![InlineStr::from("appellant"), InlineStr::from("county office")],
            method: InlineStr::from("Email and Postal Mail"),
        }))
    }
}
