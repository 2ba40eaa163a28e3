//! Decoder contract and the owned frame handle built from its output.

use tracing::debug;

use crate::engine::{self, SamplingMode};
use crate::error::{DecodeError, GeometryError, StretchError};
use crate::palette::{pack_rgb, Palette, RenderMode, Rgb, OPAQUE_ALPHA, PALETTE_SIZE};
use crate::source::{Destination, SourceImage, Viewport};

/// Output of a [`Decoder`]: one indexed image and its raw color table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Raw color table, at most 256 entries.
    pub colors: Vec<Rgb>,
    /// Row-major palette indices, `width * height` bytes.
    pub pixels: Vec<u8>,
}

/// Turns a compressed byte buffer into an indexed image.
pub trait Decoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError>;
}

impl<D: Decoder + ?Sized> Decoder for &D {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        (**self).decode(bytes)
    }
}

impl<D: Decoder + ?Sized> Decoder for Box<D> {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        (**self).decode(bytes)
    }
}

/// A decoded frame with its palette, ready for any number of resample calls.
///
/// Read-only after construction, so it can be shared across threads.
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    colors: Vec<Rgb>,
    palette: Palette,
}

impl Frame {
    /// Validate a decoded image and build its palette.
    pub fn from_decoded(image: DecodedImage) -> Result<Self, GeometryError> {
        SourceImage::new(&image.pixels, image.width, image.height)?;

        let mut colors = image.colors;
        colors.truncate(PALETTE_SIZE);
        let palette = Palette::build(&colors, colors.len());

        Ok(Self {
            width: image.width,
            height: image.height,
            pixels: image.pixels,
            colors,
            palette,
        })
    }

    /// Decode `bytes` and build the frame. Decoder failures pass through unchanged.
    pub fn decode<D: Decoder + ?Sized>(decoder: &D, bytes: &[u8]) -> Result<Self, StretchError> {
        let image = decoder.decode(bytes)?;
        debug!(
            width = image.width,
            height = image.height,
            colors = image.colors.len(),
            "Decoded frame"
        );
        Ok(Self::from_decoded(image)?)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Raw color table as decoded.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn source(&self) -> SourceImage<'_> {
        SourceImage::from_validated(&self.pixels, self.width, self.height)
    }

    /// Opaque raw color of the pixel at `(x, y)`.
    ///
    /// `None` outside the image or when the index is past the color table.
    pub fn color_at(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = self.pixels[x as usize + y as usize * self.width as usize];
        self.colors
            .get(index as usize)
            .map(|&color| pack_rgb(color, OPAQUE_ALPHA))
    }

    /// Resample a viewport of this frame into `dest`.
    pub fn stretch(&self, mode: RenderMode, viewport: &Viewport, dest: &mut Destination<'_>) -> SamplingMode {
        engine::resample(&self.source(), &self.palette, mode, viewport, dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDecoder(Option<DecodedImage>);

    impl Decoder for FixedDecoder {
        fn decode(&self, _bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
            self.0.clone().ok_or_else(|| DecodeError::new("not a GIF"))
        }
    }

    fn four_color() -> DecodedImage {
        DecodedImage {
            width: 2,
            height: 2,
            colors: vec![[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]],
            pixels: vec![0, 1, 2, 3],
        }
    }

    #[test]
    fn test_color_at_four_colors() {
        let frame = Frame::from_decoded(four_color()).unwrap();
        assert_eq!(frame.color_at(0, 0), Some(0xff0000ff));
        assert_eq!(frame.color_at(1, 0), Some(0xff00ff00));
        assert_eq!(frame.color_at(0, 1), Some(0xffff0000));
        assert_eq!(frame.color_at(1, 1), Some(0xffffffff));
        assert_eq!(frame.color_at(2, 0), None);
    }

    #[test]
    fn test_color_at_index_past_table() {
        let mut image = four_color();
        image.pixels[3] = 200;
        let frame = Frame::from_decoded(image).unwrap();
        assert_eq!(frame.color_at(1, 1), None);
    }

    #[test]
    fn test_from_decoded_rejects_bad_geometry() {
        let mut image = four_color();
        image.pixels.pop();
        let err = Frame::from_decoded(image).unwrap_err();
        assert_eq!(err, GeometryError::length("source", 4, 3));
    }

    #[test]
    fn test_decode_passes_decoder_error_through() {
        let err = Frame::decode(&FixedDecoder(None), &[1, 2, 3]).unwrap_err();
        match err {
            StretchError::Decode(e) => assert_eq!(e.message(), "not a GIF"),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_builds_palette() {
        let colors: Vec<Rgb> = (0..16).map(|i| [i as u8 * 10, 0, 0]).collect();
        let image = DecodedImage {
            width: 4,
            height: 4,
            colors,
            pixels: (0..16).collect(),
        };
        let frame = Frame::decode(&FixedDecoder(Some(image)), b"GIF89a").unwrap();
        assert_eq!(frame.palette().unfiltered()[6], 0);
        assert_eq!(frame.palette().unfiltered()[7], pack_rgb([70, 0, 0], crate::ALPHA_MARKER));
        assert_eq!(frame.palette().filtered()[9], 0);
        assert_ne!(frame.palette().filtered()[10], 0);
    }
}
