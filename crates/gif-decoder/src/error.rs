//! Errors raised while decoding a GIF byte stream.

use radar_stretch::DecodeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GifDecodeError {
    /// The byte stream is not a well-formed GIF.
    #[error("malformed GIF: {0}")]
    Malformed(#[from] gif::DecodingError),

    /// Logical screen with zero width or height.
    #[error("GIF has empty logical screen {width}x{height}")]
    EmptyScreen { width: u16, height: u16 },

    /// No image descriptor before the trailer.
    #[error("GIF contains no image frame")]
    NoFrame,

    /// Frame buffer shorter than its descriptor claims.
    #[error("frame buffer holds {got} indices, descriptor needs {expected}")]
    ShortFrame { expected: usize, got: usize },
}

impl From<GifDecodeError> for DecodeError {
    fn from(err: GifDecodeError) -> Self {
        let message = err.to_string();
        match err {
            GifDecodeError::Malformed(source) => DecodeError::with_source(message, source),
            _ => DecodeError::new(message),
        }
    }
}
