//! Image and font intake.
//!
//! Every requested image is decoded before any drawing starts; renderers only ever see a
//! complete [`loader::AssetSet`].

/// Byte sniffing and header decode.
pub mod decode;
/// Async loader that joins every requested decode.
pub mod loader;
