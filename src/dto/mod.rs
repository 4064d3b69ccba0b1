/// Health check payloads.
pub mod health;
/// Relay request and response payloads.
pub mod relay;
/// Manual payload validators.
pub mod validation;
