//! Axum-based HTTP server for the prompt2image gateway.
//!
//! This module is responsible for setting up the HTTP server, configuring
//! routes, and handling incoming requests. Generation requests pass through
//! a bearer-token gate and are delegated to the resilient generation
//! service; health and metrics probes stay unauthenticated.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual API endpoints (generate, health, cache admin, metrics).
//! - `middleware`: Request ID tracking and the bearer-token gate.
//! - `routes`: The main router configuration that ties everything together.

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
