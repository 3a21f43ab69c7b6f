use kuleana_common::prelude::*;
use kuleana_common::{
    ActivityError, ActivityName, ActivityOutput, Appeal, Complaint, InspectionRecord,
    RegistrationApplication, WorkflowInput,
};

/// The accumulated execution context of one instance: the original
/// typed input plus every prior step's output. Each activity runs at
/// most once per instance, so outputs are keyed by activity name.
pub struct StepContext {
    input: WorkflowInput,
    outputs: HashMap<ActivityName, ActivityOutput>,
}

impl StepContext {
    pub fn new(input: WorkflowInput) -> Self {
        Self {
            input,
            outputs: HashMap::new(),
        }
    }

    pub fn input(&self) -> &WorkflowInput {
        &self.input
    }

    pub fn record(&mut self, activity: ActivityName, output: ActivityOutput) {
        self.outputs.insert(activity, output);
    }

    pub fn output(&self, activity: ActivityName) -> Option<&ActivityOutput> {
        self.outputs.get(&activity)
    }

    pub fn require(&self, activity: ActivityName) -> Result<&ActivityOutput, ActivityError> {
        self.output(activity).ok_or_else(|| {
            ActivityError::Validation(format!(
                "{} result not available in execution context",
                activity.as_ref()
            ))
        })
    }

    pub fn application(&self) -> Result<&RegistrationApplication, ActivityError> {
        self.input
            .as_registration()
            .ok_or_else(|| wrong_input("registration application"))
    }

    pub fn complaint(&self) -> Result<&Complaint, ActivityError> {
        self.input.as_complaint().ok_or_else(|| wrong_input("complaint"))
    }

    pub fn appeal(&self) -> Result<&Appeal, ActivityError> {
        self.input.as_appeal().ok_or_else(|| wrong_input("appeal"))
    }

    pub fn inspection(&self) -> Result<&InspectionRecord, ActivityError> {
        self.input
            .as_inspection()
            .ok_or_else(|| wrong_input("inspection record"))
    }
}

fn wrong_input(expected: &str) -> ActivityError {
    ActivityError::Validation(format!("execution context does not carry a {}", expected))
}
