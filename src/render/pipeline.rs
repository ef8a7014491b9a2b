use crate::assets::loader::AssetSet;
use crate::compile::compiler::{CompileOpts, compile_ad};
use crate::compile::plan::AdPlan;
use crate::foundation::error::AdResult;
use crate::render::backend::execute_plan;
use crate::render::cpu::RasterBackend;
use crate::render::surface::RasterSurface;
use crate::render::svg::{VectorBackend, VectorParity};
use crate::style::details::BusinessDetails;
use crate::style::model::{FrameEffect, StyleConfig};

/// Scale used for print exports.
pub const PRINT_SCALE: f64 = 3.0;

/// Options for [`render_raster`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterOpts {
    /// Multiplier for every absolute measurement; `1.0` is preview size.
    pub scale: f64,
    /// Add bleed and crop marks.
    pub print_marks: bool,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            scale: 1.0,
            print_marks: false,
        }
    }
}

impl RasterOpts {
    /// Print export: scale 3 with bleed and crop marks.
    pub fn print() -> Self {
        Self {
            scale: PRINT_SCALE,
            print_marks: true,
        }
    }
}

/// Options for [`render_vector`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VectorOpts {
    /// How much of the layout is reproduced.
    pub parity: VectorParity,
}

/// A finished SVG artifact.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorDocument {
    /// Document width (the base image's natural width).
    pub width: u32,
    /// Document height (the base image's natural height).
    pub height: u32,
    /// UTF-8 SVG markup.
    pub svg: String,
    /// Viewer presentation hint.
    pub frame_effect: FrameEffect,
}

fn plan_for(
    style: &StyleConfig,
    assets: &AssetSet,
    details: &BusinessDetails,
    opts: CompileOpts,
) -> AdResult<AdPlan> {
    style.validate()?;
    details.validate()?;
    compile_ad(
        style,
        details,
        assets.base.size,
        assets.logo.as_ref().map(|l| l.size),
        opts,
    )
}

/// Render the ad into a raster surface.
///
/// The surface is `(baseW·scale + 2·bleed) × (baseH·scale + 2·bleed)`, truncated to whole
/// pixels, with `bleed = 37.5·scale` when print marks are requested.
#[tracing::instrument(
    skip(style, assets, details),
    fields(layout = style.layout.as_deref().unwrap_or("fallback"))
)]
pub fn render_raster(
    style: &StyleConfig,
    assets: &AssetSet,
    details: &BusinessDetails,
    opts: RasterOpts,
) -> AdResult<RasterSurface> {
    let plan = plan_for(
        style,
        assets,
        details,
        CompileOpts {
            scale: opts.scale,
            print_marks: opts.print_marks,
            banner_only: false,
        },
    )?;
    let mut backend = RasterBackend::new(plan.width, plan.height, assets)?;
    execute_plan(&mut backend, &plan)?;
    let surface = backend.finish(plan.frame_effect)?;
    tracing::debug!(
        width = surface.width(),
        height = surface.height(),
        bleed = plan.bleed,
        "raster render complete"
    );
    Ok(surface)
}

/// Render the ad as a self-contained SVG document at the base image's natural size.
///
/// No bleed or crop marks are emitted.
#[tracing::instrument(
    skip(style, assets, details),
    fields(layout = style.layout.as_deref().unwrap_or("fallback"))
)]
pub fn render_vector(
    style: &StyleConfig,
    assets: &AssetSet,
    details: &BusinessDetails,
    opts: VectorOpts,
) -> AdResult<VectorDocument> {
    let plan = plan_for(
        style,
        assets,
        details,
        CompileOpts {
            scale: 1.0,
            print_marks: false,
            banner_only: opts.parity.banner_only(),
        },
    )?;
    let mut backend = VectorBackend::new(plan.width, plan.height, assets);
    execute_plan(&mut backend, &plan)?;
    let svg = backend.finish();
    tracing::debug!(bytes = svg.len(), "vector render complete");
    Ok(VectorDocument {
        width: plan.width,
        height: plan.height,
        svg,
        frame_effect: plan.frame_effect,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
