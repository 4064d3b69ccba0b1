//! Recording spin winners and projecting the most recent ones.

use tracing::{error, info, warn};
use validator::Validate;

use crate::{
    dto::relay::{LogRequest, LogsResponse},
    error::{INVALID_RESULT, ServiceError},
    state::SharedState,
    wheel::Outcome,
};

/// Maximum number of entries returned by [`recent_results`].
pub const RECENT_LIMIT: usize = 5;

/// Append the reported winner to the spin log.
pub async fn record_result(state: &SharedState, request: LogRequest) -> Result<(), ServiceError> {
    if let Err(err) = request.validate() {
        warn!(error = %err, "rejected spin result");
        return Err(ServiceError::InvalidInput(INVALID_RESULT.into()));
    }
    let outcome = request
        .outcome()
        .ok_or_else(|| ServiceError::InvalidInput(INVALID_RESULT.into()))?;

    if let Err(err) = state.spin_log().append(outcome).await {
        error!(error = %err, "spin log write failed");
        return Err(err.into());
    }

    info!(result = %outcome, "spin recorded");
    Ok(())
}

/// Return up to [`RECENT_LIMIT`] valid entries, newest first.
///
/// An unreadable log yields an empty list rather than an error.
pub async fn recent_results(state: &SharedState) -> LogsResponse {
    match state.spin_log().read_lines().await {
        Ok(lines) => LogsResponse {
            logs: recent_labels(&lines, RECENT_LIMIT),
        },
        Err(err) => {
            error!(error = %err, "failed to read spin log");
            LogsResponse { logs: Vec::new() }
        }
    }
}

/// Keep lines that are exactly a wheel label once trimmed, newest first.
pub fn recent_labels<S: AsRef<str>>(lines: &[S], limit: usize) -> Vec<String> {
    lines
        .iter()
        .rev()
        .filter_map(|line| Outcome::from_label(line.as_ref().trim()))
        .take(limit)
        .map(|outcome| outcome.label().to_string())
        .collect()
}
