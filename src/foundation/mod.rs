/// Packed colors and hex parsing.
pub mod color;
/// Geometry and pixel primitives.
pub mod core;
/// Error taxonomy.
pub mod error;
