/// Convenience result type used across softras.
pub type SoftrasResult<T> = Result<T, SoftrasError>;

/// Top-level error taxonomy used by construction-time APIs.
///
/// The raster core itself never fails: degenerate geometry and out-of-range samples are
/// clamped or guarded. Errors only surface while building buffers, loading assets, or parsing
/// and validating scenes.
#[derive(thiserror::Error, Debug)]
pub enum SoftrasError {
    /// Invalid user-provided mesh, viewport, camera or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while loading or decoding textures.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors when serializing or deserializing scene descriptions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SoftrasError {
    /// Build a [`SoftrasError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SoftrasError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`SoftrasError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
