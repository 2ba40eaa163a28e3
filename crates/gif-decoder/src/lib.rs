//! GIF decoding for radar frames.
//!
//! Radar products are published as single-frame indexed GIFs whose palette
//! index is the intensity level. [`GifDecoder`] returns those indices
//! untouched along with the color table, ready for
//! [`Frame::from_decoded`](radar_stretch::Frame::from_decoded).

mod error;

pub use error::GifDecodeError;

use bytes::Bytes;
use radar_stretch::{DecodeError, DecodedImage, Decoder, Frame, Rgb, StretchError, PALETTE_SIZE};
use tracing::{debug, trace};

/// Decoder for the first image of a GIF stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct GifDecoder;

impl GifDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode into an indexed image the size of the logical screen.
    pub fn decode_gif(&self, bytes: &[u8]) -> Result<DecodedImage, GifDecodeError> {
        let mut options = gif::DecodeOptions::new();
        options.set_color_output(gif::ColorOutput::Indexed);
        let mut decoder = options.read_info(bytes)?;

        let (width, height) = (decoder.width(), decoder.height());
        if width == 0 || height == 0 {
            return Err(GifDecodeError::EmptyScreen { width, height });
        }
        let global = decoder.global_palette().map(<[u8]>::to_vec);

        let frame = decoder.read_next_frame()?.ok_or(GifDecodeError::NoFrame)?;
        trace!(
            left = frame.left,
            top = frame.top,
            frame_width = frame.width,
            frame_height = frame.height,
            local_palette = frame.palette.is_some(),
            "Read first frame"
        );

        let table = global.as_deref().or(frame.palette.as_deref()).unwrap_or(&[]);
        let colors = color_table(table);
        let pixels = composite(frame, width as usize, height as usize)?;

        debug!(width, height, colors = colors.len(), "Decoded GIF");
        Ok(DecodedImage {
            width: width as u32,
            height: height as u32,
            colors,
            pixels,
        })
    }

    /// Decode and build a frame in one step.
    pub fn decode_frame(&self, bytes: &Bytes) -> Result<Frame, StretchError> {
        Frame::decode(self, bytes)
    }
}

impl Decoder for GifDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        Ok(self.decode_gif(bytes)?)
    }
}

/// Split a flat `rgbrgb...` table into at most 256 colors.
fn color_table(flat: &[u8]) -> Vec<Rgb> {
    flat.chunks_exact(3)
        .take(PALETTE_SIZE)
        .map(|c| [c[0], c[1], c[2]])
        .collect()
}

/// Place the frame at its offset on a screen-sized canvas of index 0.
fn composite(frame: &gif::Frame<'_>, width: usize, height: usize) -> Result<Vec<u8>, GifDecodeError> {
    let (fw, fh) = (frame.width as usize, frame.height as usize);
    let (left, top) = (frame.left as usize, frame.top as usize);

    if left == 0 && top == 0 && fw == width && fh == height && frame.buffer.len() == width * height {
        return Ok(frame.buffer.to_vec());
    }
    if frame.buffer.len() < fw * fh {
        return Err(GifDecodeError::ShortFrame {
            expected: fw * fh,
            got: frame.buffer.len(),
        });
    }

    let mut canvas = vec![0u8; width * height];
    let visible_w = fw.min(width.saturating_sub(left));
    let visible_h = fh.min(height.saturating_sub(top));
    if visible_w == 0 || visible_h == 0 {
        trace!(left, top, "Frame lies outside the logical screen");
        return Ok(canvas);
    }
    for row in 0..visible_h {
        let src = &frame.buffer[row * fw..row * fw + visible_w];
        let start = (top + row) * width + left;
        canvas[start..start + visible_w].copy_from_slice(src);
    }
    Ok(canvas)
}
