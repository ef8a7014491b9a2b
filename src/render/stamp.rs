use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::foundation::error::{AdError, AdResult};

/// JPEG quality used when re-encoding a stamped image.
pub const STAMP_JPEG_QUALITY: u8 = 95;

const LOGO_MAX_WIDTH_FRACTION: f64 = 0.2;
const LOGO_INSET_FRACTION: f64 = 0.025;

/// Composite `logo` into the bottom-right corner of `base` and re-encode in the base format.
///
/// The logo is shrunk (never enlarged) to at most 20% of the base width and inset by 2.5% of
/// the base width from the right and bottom edges.
#[tracing::instrument(skip_all, fields(base_bytes = base.len(), logo_bytes = logo.len()))]
pub fn stamp_logo(base: &[u8], logo: &[u8]) -> AdResult<Vec<u8>> {
    let format = image::guess_format(base)
        .map_err(|e| AdError::load(format!("failed to load base image: {e}")))?;
    let mut canvas = image::load_from_memory_with_format(base, format)
        .map_err(|e| AdError::load(format!("failed to load base image: {e}")))?
        .into_rgba8();
    let logo = image::load_from_memory(logo)
        .map_err(|e| AdError::load(format!("failed to load logo image: {e}")))?
        .into_rgba8();

    let (bw, bh) = canvas.dimensions();
    let logo = fit_logo(logo, f64::from(bw) * LOGO_MAX_WIDTH_FRACTION);
    let inset = f64::from(bw) * LOGO_INSET_FRACTION;
    let x = (f64::from(bw) - f64::from(logo.width()) - inset).round() as i64;
    let y = (f64::from(bh) - f64::from(logo.height()) - inset).round() as i64;
    imageops::overlay(&mut canvas, &logo, x, y);
    tracing::debug!(x, y, logo_w = logo.width(), logo_h = logo.height(), "logo stamped");

    encode_as(canvas, format)
}

fn fit_logo(logo: RgbaImage, max_width: f64) -> RgbaImage {
    let (lw, lh) = logo.dimensions();
    let scale = (max_width / f64::from(lw)).min(1.0);
    if scale >= 1.0 {
        return logo;
    }
    let w = ((f64::from(lw) * scale).round() as u32).max(1);
    let h = ((f64::from(lh) * scale).round() as u32).max(1);
    imageops::resize(&logo, w, h, FilterType::Triangle)
}

fn encode_as(canvas: RgbaImage, format: ImageFormat) -> AdResult<Vec<u8>> {
    let mut out = Vec::new();
    match format {
        ImageFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(canvas).into_rgb8();
            JpegEncoder::new_with_quality(&mut out, STAMP_JPEG_QUALITY)
                .encode_image(&rgb)
                .map_err(|e| AdError::export_encode(format!("jpeg: {e}")))?;
        }
        other => {
            canvas
                .write_to(&mut Cursor::new(&mut out), other)
                .map_err(|e| AdError::export_encode(format!("{other:?}: {e}")))?;
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/stamp.rs"]
mod tests;
