use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the spin wheel relay.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::relay::next_outcome,
        crate::routes::relay::rig,
        crate::routes::relay::log_result,
        crate::routes::relay::recent_logs,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::relay::NextOutcomeResponse,
            crate::dto::relay::RigRequest,
            crate::dto::relay::RigResponse,
            crate::dto::relay::LogRequest,
            crate::dto::relay::LogsResponse,
            crate::wheel::Outcome,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "relay", description = "Rig slot and spin log used by the wheel and the control page"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_relay_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        for expected in ["/healthcheck", "/next-outcome", "/rig", "/log", "/logs"] {
            assert!(paths.iter().any(|path| path == expected), "missing {expected}");
        }
    }
}
