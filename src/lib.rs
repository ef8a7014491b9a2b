//! adcompose turns a photo, an optional logo and a few lines of business details into a
//! branded ad.
//!
//! A render call runs in three stages:
//!
//! - Load every requested image into an [`AssetSet`] ([`load_assets`])
//! - Compile the style into a backend-neutral plan of draw operations
//! - Execute the plan on a raster surface ([`render_raster`]) or as SVG ([`render_vector`])
//!
//! The raster surface can be encoded as PNG or JPEG; print mode adds bleed and crop marks.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Asset loading and decode.
pub mod assets;
/// Plan compiler and plan IR.
pub mod compile;
/// Filters, blur and text effects.
pub mod effects;
/// Shared primitives.
pub mod foundation;
/// Layout geometry.
pub mod layout;
/// Backends and entry points.
pub mod render;
/// Style configuration and business details.
pub mod style;

pub use crate::assets::decode::{DecodedImage, decode_image};
pub use crate::assets::loader::{
    AssetRequest, AssetSet, AssetSource, FontBytes, load_assets, load_assets_blocking,
};
pub use crate::foundation::color::Color;
pub use crate::foundation::core::{Point, Rect, Rgba8Premul, Size};
pub use crate::foundation::error::{AdError, AdResult};
pub use crate::render::pipeline::{
    RasterOpts, VectorDocument, VectorOpts, render_raster, render_vector,
};
pub use crate::render::stamp::stamp_logo;
pub use crate::render::surface::{ExportFormat, RasterSurface};
pub use crate::render::svg::VectorParity;
pub use crate::style::details::BusinessDetails;
pub use crate::style::model::{
    FontWeight, FrameEffect, ImageFilter, LayoutId, Padding, StyleConfig, TextEffect,
    TextTransform,
};
