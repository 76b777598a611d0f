//! Utility functions and helpers for the prompt2image gateway.
//!
//! This module provides cross-cutting concerns like structured logging,
//! API key sanitization, and the clock abstraction used by the
//! resilience layer.
//!
//! # Submodules
//!
//! - `logging`: Tracing and logging initialization with security filters.
//! - `clock`: Monotonic time and sleep behind a trait, for simulated time in tests.

pub mod clock;
pub mod logging;
