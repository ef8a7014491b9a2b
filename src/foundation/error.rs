/// Convenience result type used across the engine.
pub type AdResult<T> = Result<T, AdError>;

/// Top-level error taxonomy surfaced by render calls.
///
/// A render call is atomic: it yields a complete artifact or exactly one of these.
#[derive(thiserror::Error, Debug)]
pub enum AdError {
    /// An image (or font) source could not be read or decoded.
    #[error("load error: {0}")]
    Load(String),

    /// The drawing surface could not be created or drawn into.
    #[error("surface error: {0}")]
    Surface(String),

    /// A finished surface could not be converted to encoded bytes.
    ///
    /// The surface itself stays valid and may be re-exported.
    #[error("export encode error: {0}")]
    ExportEncode(String),

    /// Invalid style configuration or business details.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AdError {
    /// Build an [`AdError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build an [`AdError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build an [`AdError::ExportEncode`] value.
    pub fn export_encode(msg: impl Into<String>) -> Self {
        Self::ExportEncode(msg.into())
    }

    /// Build an [`AdError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
