//! Built-in handlers for the TVR registration activities. These stand
//! in for the county systems a production deployment would call; each
//! mints identifiers from the current timestamp, so calls are not
//! idempotent.

use async_trait::async_trait;
use chrono::{Duration, Utc};

use kuleana_common::prelude::*;
use kuleana_common::{
    ActivityError, ActivityOutput, FinalApprovalResult, InitialReviewResult, InspectionAppointment,
    NcucResult, ZoningResult,
};

use super::handler::ActivityHandler;
use crate::runtime::execution::StepContext;

pub struct PerformInitialReview;

#[async_trait]
impl ActivityHandler for PerformInitialReview {
    async fn execute(&self, ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        let application = ctx.application()?;
        debug!(
            "performing initial review for application: {}",
            application.application_id
        );

        if application.property_id.is_empty() || application.applicant_name.is_empty() {
            return Err(ActivityError::Validation(
                "Missing required application information".to_string(),
            ));
        }

        Ok(ActivityOutput::InitialReview(InitialReviewResult {
            approved: true,
            reason: InlineStr::from("Application passed initial review"),
        }))
    }
}

pub struct VerifyZoning;

#[async_trait]
impl ActivityHandler for VerifyZoning {
    async fn execute(&self, ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        let application = ctx.application()?;
        debug!("verifying zoning for property: {}", application.property_id);

        Ok(ActivityOutput::Zoning(ZoningResult {
            compliant: true,
            zoning_code: InlineStr::from("R-1"),
            restrictions: Vec::new(),
        }))
    }
}

pub struct ProcessNcuc;

#[async_trait]
impl ActivityHandler for ProcessNcuc {
    async fn execute(&self, ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        let application = ctx.application()?;
        debug!(
            "processing NCUC application for: {}",
            application.application_id
        );

        Ok(ActivityOutput::Ncuc(NcucResult {
            approved: true,
            ncuc_number: format!("NCUC-{}", Utc::now().timestamp_millis()).into(),
            processing_time: InlineStr::from("3 days"),
        }))
    }
}

pub struct ScheduleInspection;

#[async_trait]
impl ActivityHandler for ScheduleInspection {
    async fn execute(&self, ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        let application = ctx.application()?;
        debug!("scheduling inspection for: {}", application.application_id);

        Ok(ActivityOutput::InspectionScheduling(InspectionAppointment {
            id: format!("INS-{}", Utc::now().timestamp_millis()).into(),
            scheduled_date: (Utc::now() + Duration::days(7)).to_rfc3339().into(),
            inspector: InlineStr::from("County Inspector"),
        }))
    }
}

pub struct FinalizeRegistration;

#[async_trait]
impl ActivityHandler for FinalizeRegistration {
    async fn execute(&self, ctx: &StepContext) -> Result<ActivityOutput, ActivityError> {
        let application = ctx.application()?;
        debug!("finalizing registration for: {}", application.application_id);

        let now = Utc::now();
        Ok(ActivityOutput::FinalApproval(FinalApprovalResult {
            id: format!("REG-{}", now.timestamp_millis()).into(),
            approved_at: now.to_rfc3339().into(),
            registration_number: format!("TVR-{}", now.timestamp_millis()).into(),
        }))
    }
}
