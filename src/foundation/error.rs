/// Convenience result type used across calwall.
pub type CalwallResult<T> = Result<T, CalwallError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum CalwallError {
    /// Malformed enum, range or color values in a [`crate::WallpaperConfig`] or render request.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Encoded background buffer is larger than the accepted input size.
    #[error("image too large: {bytes} bytes exceeds limit of {max} bytes")]
    ImageTooLarge {
        /// Size of the rejected buffer.
        bytes: usize,
        /// Accepted maximum.
        max: usize,
    },

    /// Background dimensions (read from the header) exceed the accepted limits.
    #[error("image dimensions exceeded: {width}x{height} ({reason})")]
    ImageDimensionsExceeded {
        /// Reported width in pixels.
        width: u32,
        /// Reported height in pixels.
        height: u32,
        /// Which limit was hit.
        reason: String,
    },

    /// Corrupt or unsupported bitmap.
    #[error("image decode failure: {0}")]
    ImageDecode(String),

    /// Font families did not become ready within the bounded wait.
    #[error("font load timeout after {waited_ms} ms: missing {families:?}")]
    FontLoadTimeout {
        /// Families still missing when the wait expired.
        families: Vec<String>,
        /// Time spent waiting.
        waited_ms: u64,
    },

    /// Unexpected rasterizer or encoder failure.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CalwallError {
    /// Build a [`CalwallError::InvalidConfig`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Build a [`CalwallError::ImageDecode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    /// Build a [`CalwallError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CalwallError::ImageDimensionsExceeded`] value.
    pub fn dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::ImageDimensionsExceeded {
            width,
            height,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
