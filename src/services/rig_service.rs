//! Operator rig slot: force the next spin, hand the forced outcome to the wheel once.

use tracing::{info, warn};
use validator::Validate;

use crate::{
    dto::relay::{NextOutcomeResponse, RigRequest, RigResponse},
    error::{INVALID_OUTCOME, ServiceError},
    state::SharedState,
};

/// Store the requested outcome for the next spin, replacing any pending one.
pub async fn rig_next(state: &SharedState, request: RigRequest) -> Result<RigResponse, ServiceError> {
    if let Err(err) = request.validate() {
        warn!(error = %err, "rejected rig request");
        return Err(ServiceError::InvalidInput(INVALID_OUTCOME.into()));
    }
    let outcome = request
        .outcome()
        .ok_or_else(|| ServiceError::InvalidInput(INVALID_OUTCOME.into()))?;

    let replaced = state.rig().set(outcome).await;
    info!(outcome = %outcome, replaced = ?replaced, "next spin rigged");

    Ok(RigResponse {
        success: true,
        message: format!("Next spin will be {outcome}"),
    })
}

/// Consume the pending rig, leaving the slot empty.
pub async fn take_next(state: &SharedState) -> NextOutcomeResponse {
    let outcome = state.rig().take().await;
    if let Some(outcome) = outcome {
        info!(outcome = %outcome, "rigged outcome handed to the wheel");
    }
    NextOutcomeResponse { outcome }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{state::test_support::failing_state, wheel::Outcome};

    fn rig_request(value: serde_json::Value) -> RigRequest {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn rig_then_take_once() {
        let state = failing_state();
        let response = rig_next(&state, rig_request(json!({ "outcome": "dark" })))
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.message, "Next spin will be DARK");

        assert_eq!(take_next(&state).await.outcome, Some(Outcome::Dark));
        assert_eq!(take_next(&state).await.outcome, None);
    }

    #[tokio::test]
    async fn invalid_outcome_leaves_slot_untouched() {
        let state = failing_state();
        rig_next(&state, rig_request(json!({ "outcome": "light" })))
            .await
            .unwrap();

        let err = rig_next(&state, rig_request(json!({ "outcome": "blue" })))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(message) if message == INVALID_OUTCOME));
        assert_eq!(state.rig().peek().await, Some(Outcome::Light));
    }
}
