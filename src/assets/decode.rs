use std::sync::Arc;

use crate::foundation::core::{Size, premultiply_rgba8_in_place};
use crate::foundation::error::{AdError, AdResult};

/// A fully decoded image plus the encoded bytes it came from.
///
/// The encoded bytes are kept so the vector backend can embed the original file.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    /// Natural pixel size.
    pub size: Size,
    /// Premultiplied RGBA8 pixels, tightly packed, row-major.
    pub rgba8_premul: Arc<Vec<u8>>,
    /// Original encoded bytes.
    pub encoded: Arc<[u8]>,
    /// Mime type of `encoded` (e.g. `image/png`).
    pub mime: String,
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
///
/// A recognized `declared_mime` selects the decoder; otherwise the format is sniffed from the
/// bytes. Every failure is a [`AdError::Load`].
pub fn decode_image(bytes: &[u8], declared_mime: Option<&str>) -> AdResult<DecodedImage> {
    let format = match declared_mime.and_then(image::ImageFormat::from_mime_type) {
        Some(f) => f,
        None => image::guess_format(bytes)
            .map_err(|e| AdError::load(format!("unrecognized image format: {e}")))?,
    };

    let dyn_img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| AdError::load(format!("decode {format:?} image: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let size = Size::new(width, height).map_err(|_| AdError::load("image has zero size"))?;

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(DecodedImage {
        size,
        rgba8_premul: Arc::new(rgba8_premul),
        encoded: Arc::from(bytes),
        mime: format.to_mime_type().to_owned(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
