use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::StreamExt;
use futures::stream::FuturesUnordered;

use crate::assets::decode::{DecodedImage, decode_image};
use crate::foundation::error::{AdError, AdResult};

/// Where an input file comes from.
#[derive(Clone, Debug)]
pub enum AssetSource {
    /// In-memory bytes with an optional declared mime type.
    Bytes {
        /// Encoded file contents.
        bytes: Arc<[u8]>,
        /// Declared mime type, if the caller knows it.
        mime: Option<String>,
    },
    /// A file on disk; the mime type is inferred from the extension.
    Path(PathBuf),
}

impl AssetSource {
    /// In-memory source.
    pub fn bytes(bytes: impl Into<Arc<[u8]>>, mime: Option<&str>) -> Self {
        Self::Bytes {
            bytes: bytes.into(),
            mime: mime.map(str::to_owned),
        }
    }

    /// File source.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Blocking read; file sources hit the filesystem on the calling thread.
    fn read(&self) -> AdResult<(Arc<[u8]>, Option<String>)> {
        match self {
            Self::Bytes { bytes, mime } => Ok((bytes.clone(), mime.clone())),
            Self::Path(p) => {
                let bytes = std::fs::read(p)
                    .map_err(|e| AdError::load(format!("read '{}': {e}", p.display())))?;
                Ok((Arc::from(bytes), mime_from_path(p)))
            }
        }
    }
}

fn mime_from_path(p: &Path) -> Option<String> {
    image::ImageFormat::from_path(p)
        .ok()
        .map(|f| f.to_mime_type().to_owned())
}

/// Raw font file bytes used by the raster backend for text shaping.
#[derive(Clone, Debug)]
pub struct FontBytes(pub Arc<[u8]>);

/// Everything a render call asks the loader for.
#[derive(Clone, Debug)]
pub struct AssetRequest {
    /// Base photo; always required.
    pub base: AssetSource,
    /// Optional logo.
    pub logo: Option<AssetSource>,
    /// Optional TTF/OTF font for raster text.
    pub font: Option<AssetSource>,
}

impl AssetRequest {
    /// Request with only a base image.
    pub fn new(base: AssetSource) -> Self {
        Self {
            base,
            logo: None,
            font: None,
        }
    }

    /// Builder-style logo source.
    pub fn with_logo(mut self, logo: AssetSource) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Builder-style font source.
    pub fn with_font(mut self, font: AssetSource) -> Self {
        self.font = Some(font);
        self
    }
}

/// Completed decode results for one render call.
///
/// Only ever constructed complete: renderers never observe a partially loaded set. Dropping the
/// set releases every decode handle.
#[derive(Clone, Debug)]
pub struct AssetSet {
    /// Decoded base photo.
    pub base: Arc<DecodedImage>,
    /// Decoded logo, if one was requested.
    pub logo: Option<Arc<DecodedImage>>,
    /// Font bytes, if one was requested.
    pub font: Option<FontBytes>,
}

impl AssetSet {
    /// Assemble a set from already-decoded images.
    pub fn new(base: DecodedImage, logo: Option<DecodedImage>) -> Self {
        Self {
            base: Arc::new(base),
            logo: logo.map(Arc::new),
            font: None,
        }
    }

    /// Builder-style font bytes.
    pub fn with_font(mut self, font: impl Into<Arc<[u8]>>) -> Self {
        self.font = Some(FontBytes(font.into()));
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Base,
    Logo,
}

impl Slot {
    fn label(self) -> &'static str {
        match self {
            Self::Base => "base image",
            Self::Logo => "logo image",
        }
    }
}

/// Message of `e` without the `load error:` prefix when it already is a load failure.
fn load_detail(e: AdError) -> String {
    match e {
        AdError::Load(msg) => msg,
        other => other.to_string(),
    }
}

async fn decode_slot(slot: Slot, source: &AssetSource) -> AdResult<(Slot, DecodedImage)> {
    let wrap = |e: AdError| {
        AdError::load(format!("failed to load {}: {}", slot.label(), load_detail(e)))
    };
    let (bytes, mime) = source.read().map_err(wrap)?;
    let img = decode_image(&bytes, mime.as_deref()).map_err(wrap)?;
    Ok((slot, img))
}

/// Decode every requested image and return once all of them have completed.
///
/// Completions are counted against the number of requested images rather than taken in
/// arrival order. The first failure aborts the load with [`AdError::Load`]; decodes still in
/// flight are dropped with it.
///
/// File reads and decodes are CPU/disk work done inside the futures, so they run on whichever
/// thread polls this one. Drive it from a blocking context (or [`load_assets_blocking`]) rather
/// than from an async reactor thread.
#[tracing::instrument(skip(req), fields(has_logo = req.logo.is_some(), has_font = req.font.is_some()))]
pub async fn load_assets(req: &AssetRequest) -> AdResult<AssetSet> {
    let mut pending = FuturesUnordered::new();
    pending.push(decode_slot(Slot::Base, &req.base));
    if let Some(logo) = &req.logo {
        pending.push(decode_slot(Slot::Logo, logo));
    }
    let expected = pending.len();

    let mut loaded = 0usize;
    let mut base = None;
    let mut logo = None;
    while let Some(done) = pending.next().await {
        let (slot, img) = done?;
        tracing::debug!(
            slot = slot.label(),
            width = img.size.width,
            height = img.size.height,
            "decoded"
        );
        match slot {
            Slot::Base => base = Some(img),
            Slot::Logo => logo = Some(img),
        }
        loaded += 1;
    }
    if loaded != expected {
        return Err(AdError::load(format!(
            "decoded {loaded} of {expected} requested images"
        )));
    }
    let base = base.ok_or_else(|| AdError::load("base image missing after decode"))?;

    let font = match &req.font {
        Some(src) => {
            let (bytes, _) = src
                .read()
                .map_err(|e| AdError::load(format!("failed to load font: {}", load_detail(e))))?;
            if bytes.is_empty() {
                return Err(AdError::load("failed to load font: file is empty"));
            }
            Some(FontBytes(bytes))
        }
        None => None,
    };

    Ok(AssetSet {
        base: Arc::new(base),
        logo: logo.map(Arc::new),
        font,
    })
}

/// Drive [`load_assets`] to completion on the current thread.
pub fn load_assets_blocking(req: &AssetRequest) -> AdResult<AssetSet> {
    futures::executor::block_on(load_assets(req))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
