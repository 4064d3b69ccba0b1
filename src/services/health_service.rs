use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report `ok` when the spin log is reachable, `degraded` otherwise.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.spin_log().health_check().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "spin log health check failed");
            HealthResponse::degraded()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::{failing_state, temp_state};

    #[tokio::test]
    async fn reachable_log_is_ok() {
        let (state, path) = temp_state().await;
        assert_eq!(health_status(&state).await.status, "ok");
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn broken_log_is_degraded() {
        let state = failing_state();
        assert_eq!(health_status(&state).await.status, "degraded");
    }
}
