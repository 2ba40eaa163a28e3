//! Error types for palette building, decoding and resampling.

use thiserror::Error;

/// Buffer geometry that does not match its declared dimensions.
///
/// Always detected before any destination pixel is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Width or height is zero.
    #[error("{buffer} dimensions must be positive, got {width}x{height}")]
    EmptyDimensions {
        buffer: &'static str,
        width: u32,
        height: u32,
    },

    /// Buffer length is not consistent with the given width and height.
    #[error("{buffer} buffer length is not consistent with given width and height: expected {expected} elements, got {got}")]
    LengthMismatch {
        buffer: &'static str,
        expected: usize,
        got: usize,
    },

    /// A palette table that is not exactly 256 entries long.
    #[error("{table} palette must have 256 entries, got {got}")]
    PaletteLength { table: &'static str, got: usize },
}

impl GeometryError {
    pub(crate) fn empty(buffer: &'static str, width: u32, height: u32) -> Self {
        Self::EmptyDimensions {
            buffer,
            width,
            height,
        }
    }

    pub(crate) fn length(buffer: &'static str, expected: usize, got: usize) -> Self {
        Self::LengthMismatch {
            buffer,
            expected,
            got,
        }
    }
}

/// Failure reported by a [`Decoder`](crate::Decoder).
///
/// Opaque to the resampling engine: it is carried through unchanged.
#[derive(Debug, Error)]
#[error("decode failed: {message}")]
pub struct DecodeError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl DecodeError {
    /// Create a decode error with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a decode error wrapping the decoder library's own error.
    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The decoder's description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Single structured error for frame-level operations and the flat
/// [`stretch`](crate::stretch) entrypoint.
#[derive(Debug, Error)]
pub enum StretchError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Result type for resampling operations.
pub type Result<T> = std::result::Result<T, StretchError>;
