/// Convenience result type used across the crate.
pub type ThumbResult<T> = Result<T, ThumbError>;

/// Failure taxonomy for one thumbnail render.
///
/// The pipeline never lets these escape [`crate::ThumbnailPipeline::generate`]; they exist so the
/// orchestrator can decide how to log and clean up before substituting the fallback image.
#[derive(thiserror::Error, Debug)]
pub enum ThumbError {
    /// Unreachable host, non-200 status, or a truncated/empty body.
    #[error("network error: {0}")]
    Network(String),

    /// Fetched bytes are not a decodable image.
    #[error("decode error: {0}")]
    Decode(String),

    /// A required font or static asset is missing or unreadable.
    #[error("asset error: {0}")]
    Asset(String),

    /// Geometry that does not fit the canvas. Always a programming defect.
    #[error("layout error: {0}")]
    Layout(String),

    /// Filesystem failures around scratch and cache files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThumbError {
    /// Build a [`ThumbError::Network`] value.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Build a [`ThumbError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ThumbError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ThumbError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Short stable label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Decode(_) => "decode",
            Self::Asset(_) => "asset",
            Self::Layout(_) => "layout",
            Self::Io(_) => "io",
            Self::Other(_) => "other",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
