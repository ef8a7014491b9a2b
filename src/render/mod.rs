//! Paint backends and the two render entry points.
//!
//! Both backends execute the same [`crate::compile::plan::AdPlan`] through
//! [`backend::PaintBackend`]; only the output medium differs.

/// Backend trait and plan executor.
pub mod backend;
/// CPU raster backend.
pub mod cpu;
/// Render entry points.
pub mod pipeline;
/// Logo watermark helper.
pub mod stamp;
/// Finished raster surfaces and export encoding.
pub mod surface;
/// SVG vector backend.
pub mod svg;
pub(crate) mod text;
