//! Payloads exchanged between the wheel, the control page and the relay.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::validation::{
        parse_result_label, parse_rig_outcome, validate_result_label, validate_rig_outcome,
    },
    wheel::Outcome,
};

/// Rigged outcome handed to the next spin, `null` when the spin is fair.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NextOutcomeResponse {
    /// Forced outcome, or `null` for a fair spin.
    pub outcome: Option<Outcome>,
}

/// Operator request forcing the next spin.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RigRequest {
    /// `"dark"` or `"light"`; anything else is rejected.
    #[serde(default)]
    #[schema(value_type = String)]
    pub outcome: Option<Value>,
}

impl RigRequest {
    /// Build a request for `outcome`.
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome: Some(Value::String(outcome.as_wire().to_string())),
        }
    }

    /// Requested outcome, if it is a valid one.
    pub fn outcome(&self) -> Option<Outcome> {
        parse_rig_outcome(self.outcome.as_ref())
    }
}

impl Validate for RigRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(e) = validate_rig_outcome(self.outcome.as_ref()) {
            errors.add("outcome", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Acknowledgement for an accepted or rejected rig request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RigResponse {
    /// Whether the rig was stored.
    pub success: bool,
    /// Human-readable confirmation or rejection reason.
    pub message: String,
}

/// Winner reported by the wheel once a spin settles.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LogRequest {
    /// `"DARK"` or `"LIGHT"`.
    #[serde(default)]
    #[schema(value_type = String)]
    pub result: Option<Value>,
}

impl LogRequest {
    /// Build a report for `outcome`.
    pub fn new(outcome: Outcome) -> Self {
        Self {
            result: Some(Value::String(outcome.label().to_string())),
        }
    }

    /// Reported outcome, if it is a valid label.
    pub fn outcome(&self) -> Option<Outcome> {
        parse_result_label(self.result.as_ref())
    }
}

impl Validate for LogRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(e) = validate_result_label(self.result.as_ref()) {
            errors.add("result", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Most recent spins recorded in the log, newest first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LogsResponse {
    /// Up to five labels, newest first.
    pub logs: Vec<String>,
}
