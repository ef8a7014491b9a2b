//! Pixel and text effects that do not depend on a particular backend.

/// Separable Gaussian blur on premultiplied RGBA8.
pub mod blur;
/// Image filter chains: CSS-style steps plus duotone.
pub mod filter;
/// Text case transforms and decoration passes.
pub mod text;
