/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Spin log recording and recent history projection.
pub mod log_service;
/// Operator rig slot handling.
pub mod rig_service;
