//! Serde boundary for per-render inputs.

/// Business text fields.
pub mod details;
/// Style configuration and its enums.
pub mod model;
