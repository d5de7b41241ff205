/// Convenience result type used across gifstill.
pub type GifstillResult<T> = Result<T, GifstillError>;

/// Top-level error taxonomy used by the library APIs.
#[derive(thiserror::Error, Debug)]
pub enum GifstillError {
    /// Invalid user-provided data (frame index, quality, thread count).
    #[error("validation error: {0}")]
    Validation(String),

    /// The source stream could not be decoded as a GIF animation.
    #[error("decode error: {0}")]
    Decode(String),

    /// A composited frame could not be encoded to the output format.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GifstillError {
    /// Build a [`GifstillError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GifstillError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`GifstillError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
