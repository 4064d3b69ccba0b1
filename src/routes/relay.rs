use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use tracing::warn;

use crate::{
    dto::relay::{LogRequest, LogsResponse, NextOutcomeResponse, RigRequest, RigResponse},
    error::{AppError, INVALID_OUTCOME, INVALID_RESULT, ServiceError},
    services::{log_service, rig_service},
    state::SharedState,
};

/// Endpoints polled by the wheel and the control page.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/next-outcome", get(next_outcome))
        .route("/rig", post(rig))
        .route("/log", post(log_result))
        .route("/logs", get(recent_logs))
}

#[utoipa::path(
    get,
    path = "/next-outcome",
    tag = "relay",
    responses((status = 200, description = "Pending rigged outcome; the slot is cleared by this call", body = NextOutcomeResponse))
)]
/// Hand the pending rigged outcome to the wheel and clear it.
pub async fn next_outcome(State(state): State<SharedState>) -> Json<NextOutcomeResponse> {
    Json(rig_service::take_next(&state).await)
}

#[utoipa::path(
    post,
    path = "/rig",
    tag = "relay",
    request_body = RigRequest,
    responses(
        (status = 200, description = "Next spin rigged", body = RigResponse),
        (status = 400, description = "Outcome is neither dark nor light", body = RigResponse)
    )
)]
/// Force the outcome of the next spin.
pub async fn rig(
    State(state): State<SharedState>,
    payload: Result<Json<RigRequest>, JsonRejection>,
) -> Result<Json<RigResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| unreadable_body(rejection, INVALID_OUTCOME))?;
    let response = rig_service::rig_next(&state, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/log",
    tag = "relay",
    request_body = LogRequest,
    responses(
        (status = 200, description = "Result appended to the spin log"),
        (status = 400, description = "Result is not a wheel label"),
        (status = 500, description = "Spin log could not be written")
    )
)]
/// Append a spin winner to the log.
pub async fn log_result(
    State(state): State<SharedState>,
    payload: Result<Json<LogRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(payload) = payload.map_err(|rejection| unreadable_body(rejection, INVALID_RESULT))?;
    log_service::record_result(&state, payload).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/logs",
    tag = "relay",
    responses((status = 200, description = "Up to five most recent results, newest first", body = LogsResponse))
)]
/// Return the most recent spin results.
pub async fn recent_logs(State(state): State<SharedState>) -> Json<LogsResponse> {
    Json(log_service::recent_results(&state).await)
}

/// Missing content type, broken JSON or a non-object body all answer like an invalid value.
fn unreadable_body(rejection: JsonRejection, message: &str) -> AppError {
    warn!(status = %rejection.status(), error = %rejection.body_text(), "unreadable request body");
    ServiceError::InvalidInput(message.into()).into()
}
