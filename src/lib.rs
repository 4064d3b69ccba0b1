//! Library crate for the spin wheel relay and animator, exposing modules for the binaries and tests.

pub mod client;
pub mod config;
/// Spin log persistence.
pub mod dao;
mod dto;
mod error;
/// HTTP route trees.
pub mod routes;
/// Relay business logic.
pub mod services;
/// Shared application state.
pub mod state;
pub mod wheel;
