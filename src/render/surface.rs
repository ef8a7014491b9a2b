use std::io::Cursor;
use std::path::Path;

use crate::foundation::core::{Rgba8Premul, unpremultiply_rgba8_in_place};
use crate::foundation::error::{AdError, AdResult};
use crate::style::model::FrameEffect;

/// JPEG quality used for raster exports.
pub const EXPORT_JPEG_QUALITY: u8 = 90;

/// Encoded output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Lossless PNG with alpha.
    Png,
    /// Baseline JPEG; alpha is dropped.
    Jpeg {
        /// Quality in `1..=100`.
        quality: u8,
    },
}

impl ExportFormat {
    /// JPEG at the default export quality.
    pub fn jpeg() -> Self {
        Self::Jpeg {
            quality: EXPORT_JPEG_QUALITY,
        }
    }

    /// Pick a format from a file extension (`png`, `jpg`, `jpeg`).
    pub fn from_path(path: &Path) -> AdResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("jpg" | "jpeg") => Ok(Self::jpeg()),
            _ => Err(AdError::export_encode(format!(
                "cannot infer raster format from '{}'",
                path.display()
            ))),
        }
    }
}

/// A finished raster artifact: premultiplied RGBA8, row-major, tightly packed.
#[derive(Clone, Debug)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
    frame_effect: FrameEffect,
}

impl RasterSurface {
    pub(crate) fn from_premul(
        width: u32,
        height: u32,
        data: Vec<u8>,
        frame_effect: FrameEffect,
    ) -> AdResult<Self> {
        if data.len() != (width as usize) * (height as usize) * 4 {
            return Err(AdError::surface("surface byte length does not match dimensions"));
        }
        Ok(Self {
            width,
            height,
            data,
            frame_effect,
        })
    }

    /// Width in px.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in px.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied pixel bytes.
    pub fn data_premul(&self) -> &[u8] {
        &self.data
    }

    /// Viewer presentation hint carried from the style.
    pub fn frame_effect(&self) -> FrameEffect {
        self.frame_effect
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.data[i..i + 4];
        Some(Rgba8Premul {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
    }

    /// Straight-alpha copy of the pixels.
    pub fn to_rgba8_straight(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    /// Encode to bytes. Failure leaves the surface untouched, so it may be exported again.
    pub fn encode(&self, format: ExportFormat) -> AdResult<Vec<u8>> {
        let rgba = image::RgbaImage::from_raw(self.width, self.height, self.to_rgba8_straight())
            .ok_or_else(|| AdError::export_encode("pixel buffer does not match dimensions"))?;
        let mut out = Vec::new();
        match format {
            ExportFormat::Png => {
                rgba.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
                    .map_err(|e| AdError::export_encode(format!("png: {e}")))?;
            }
            ExportFormat::Jpeg { quality } => {
                let rgb = image::DynamicImage::ImageRgba8(rgba).into_rgb8();
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
                    .encode_image(&rgb)
                    .map_err(|e| AdError::export_encode(format!("jpeg: {e}")))?;
            }
        }
        tracing::debug!(bytes = out.len(), ?format, "encoded surface");
        Ok(out)
    }

    /// Encode by file extension and write to `path`.
    pub fn save(&self, path: &Path) -> AdResult<()> {
        let bytes = self.encode(ExportFormat::from_path(path)?)?;
        std::fs::write(path, bytes)
            .map_err(|e| AdError::export_encode(format!("write '{}': {e}", path.display())))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
