use crate::prelude::*;

/// A request to start one compliance process.
///
/// The workflow type must name one of the registered process kinds; the
/// input payload is kept raw here and validated against the kind's
/// record schema when the engine accepts the request.
pub struct StartProcessRequest {
    /// Wire name of the process kind, e.g. `TVRRegistrationWorkflow`.
    pub workflow_type: InlineStr,
    /// JSON object with the domain payload for the process.
    pub input: serde_json::Value,
}

impl StartProcessRequest {
    pub fn new(workflow_type: impl Into<InlineStr>, input: serde_json::Value) -> Self {
        Self {
            workflow_type: workflow_type.into(),
            input,
        }
    }
}

impl TryFrom<serde_json::Value> for StartProcessRequest {
    type Error = ErrorCode;
    fn try_from(mut value: serde_json::Value) -> Result<Self, Self::Error> {
        let workflow_type: InlineStr = value
            .get("workflowType")
            .and_then(|x| x.as_str())
            .ok_or_else(|| ErrorCode::IllegalArgument("workflowType not found"))?
            .trim()
            .into();

        let input = match value.get_mut("input") {
            Some(input) if input.is_object() => input.take(),
            Some(_) => return str_err!(IllegalArgument, "input invalid, not an object"),
            None => return str_err!(IllegalArgument, "input not found"),
        };

        Ok(Self {
            workflow_type,
            input,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_start_request() {
        let body = serde_json::json!({
            "workflowType": "TVRRegistrationWorkflow",
            "input": { "applicationId": "APP-1" }
        });
        let request = StartProcessRequest::try_from(body).expect("parse StartProcessRequest");
        assert_eq!(request.workflow_type, "TVRRegistrationWorkflow");
        assert_eq!(request.input["applicationId"], "APP-1");
    }

    #[test]
    fn rejects_a_missing_input_object() {
        let body = serde_json::json!({ "workflowType": "ViolationAppealWorkflow" });
        assert!(StartProcessRequest::try_from(body).is_err());
    }
}
