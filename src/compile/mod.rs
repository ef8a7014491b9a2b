//! Style + details + asset sizes → a flat list of draw operations.

/// Compiler from style inputs to an [`plan::AdPlan`].
pub mod compiler;
/// Plan IR shared by both paint backends.
pub mod plan;
