//! Validation helpers for DTOs.

use serde_json::Value;
use validator::ValidationError;

use crate::wheel::Outcome;

/// Extract an outcome from its lowercase wire form (`"dark"`, `"light"`).
pub fn parse_rig_outcome(value: Option<&Value>) -> Option<Outcome> {
    value.and_then(Value::as_str).and_then(Outcome::from_wire)
}

/// Extract an outcome from its uppercase log label (`"DARK"`, `"LIGHT"`),
/// ignoring surrounding whitespace.
pub fn parse_result_label(value: Option<&Value>) -> Option<Outcome> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .and_then(Outcome::from_label)
}

/// Validates that a rig request names one of the two wire outcomes.
///
/// # Examples
///
/// ```ignore
/// validate_rig_outcome(Some(&json!("dark")))  // Ok
/// validate_rig_outcome(Some(&json!("DARK")))  // Err - wrong case
/// validate_rig_outcome(Some(&json!("blue")))  // Err
/// ```
pub fn validate_rig_outcome(value: Option<&Value>) -> Result<(), ValidationError> {
    if parse_rig_outcome(value).is_some() {
        return Ok(());
    }

    let mut err = ValidationError::new("rig_outcome");
    err.message = Some(format!("outcome must be \"dark\" or \"light\" (got {})", describe(value)).into());
    Err(err)
}

/// Validates that a reported result is one of the two wheel labels.
pub fn validate_result_label(value: Option<&Value>) -> Result<(), ValidationError> {
    if parse_result_label(value).is_some() {
        return Ok(());
    }

    let mut err = ValidationError::new("result_label");
    err.message = Some(format!("result must be \"DARK\" or \"LIGHT\" (got {})", describe(value)).into());
    Err(err)
}

fn describe(value: Option<&Value>) -> String {
    value.map_or_else(|| "nothing".to_string(), Value::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_validate_rig_outcome_valid() {
        assert!(validate_rig_outcome(Some(&json!("dark"))).is_ok());
        assert!(validate_rig_outcome(Some(&json!("light"))).is_ok());
    }

    #[test]
    fn test_validate_rig_outcome_invalid() {
        assert!(validate_rig_outcome(Some(&json!("blue"))).is_err());
        assert!(validate_rig_outcome(Some(&json!("DARK"))).is_err()); // wrong case
        assert!(validate_rig_outcome(Some(&json!(1))).is_err());
        assert!(validate_rig_outcome(Some(&Value::Null)).is_err());
        assert!(validate_rig_outcome(None).is_err());
    }

    #[test]
    fn test_validate_result_label() {
        assert!(validate_result_label(Some(&json!("DARK"))).is_ok());
        assert!(validate_result_label(Some(&json!(" LIGHT\n"))).is_ok());
        assert!(validate_result_label(Some(&json!("light"))).is_err());
        assert!(validate_result_label(Some(&json!(["DARK"]))).is_err());
        assert!(validate_result_label(None).is_err());
    }
}
