//! Borrowed views over the source index buffer and the RGBA destination,
//! plus the continuous viewport rectangle that maps one onto the other.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// `width * height`, or `None` when it does not fit in `usize`.
fn pixel_count(width: u32, height: u32) -> Option<usize> {
    (width as usize).checked_mul(height as usize)
}

/// Immutable view over a decoded pixel-index buffer.
#[derive(Debug, Clone, Copy)]
pub struct SourceImage<'a> {
    width: u32,
    height: u32,
    pixels: &'a [u8],
}

impl<'a> SourceImage<'a> {
    /// Wrap an index buffer, checking it holds exactly `width * height` bytes.
    pub fn new(pixels: &'a [u8], width: u32, height: u32) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::empty("source", width, height));
        }
        let expected = pixel_count(width, height)
            .ok_or_else(|| GeometryError::length("source", usize::MAX, pixels.len()))?;
        if pixels.len() != expected {
            return Err(GeometryError::length("source", expected, pixels.len()));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Geometry already checked by the caller.
    pub(crate) fn from_validated(pixels: &'a [u8], width: u32, height: u32) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    /// Palette index at `(x, y)`. Callers keep coordinates in bounds.
    #[inline(always)]
    pub fn index_at(&self, x: usize, y: usize) -> u8 {
        self.pixels[x + y * self.width as usize]
    }

    /// One scanline of indices.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }
}

/// Continuous rectangle in source-pixel space.
///
/// `right > left` and `bottom > top` are expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Viewport {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Viewport covering a whole `width x height` image one-to-one.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0.0, width as f64, 0.0, height as f64)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// True when both extents are positive and finite.
    pub fn has_area(&self) -> bool {
        let (w, h) = (self.width(), self.height());
        w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()
    }
}

impl std::str::FromStr for Viewport {
    type Err = String;

    /// Parse `left,right,top,bottom`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|e| format!("invalid viewport '{}': {}", s, e))?;
        match parts.as_slice() {
            [left, right, top, bottom] => Ok(Self::new(*left, *right, *top, *bottom)),
            _ => Err(format!(
                "invalid viewport '{}': expected left,right,top,bottom",
                s
            )),
        }
    }
}

/// Mutable view over a caller-owned RGBA destination, one packed word per pixel.
#[derive(Debug)]
pub struct Destination<'a> {
    width: u32,
    height: u32,
    pixels: &'a mut [u32],
}

impl<'a> Destination<'a> {
    /// Wrap a destination buffer, checking its byte length is `width * height * 4`.
    pub fn new(pixels: &'a mut [u32], width: u32, height: u32) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::empty("destination", width, height));
        }
        let expected = pixel_count(width, height)
            .ok_or_else(|| GeometryError::length("destination", usize::MAX, pixels.len()))?;
        if pixels.len() != expected {
            return Err(GeometryError::length("destination", expected, pixels.len()));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &*self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut *self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_rejects_wrong_length() {
        let pixels = [0u8; 15];
        let err = SourceImage::new(&pixels, 4, 4).unwrap_err();
        assert_eq!(err, GeometryError::length("source", 16, 15));
    }

    #[test]
    fn test_source_rejects_zero_dimensions() {
        let err = SourceImage::new(&[], 0, 4).unwrap_err();
        assert!(matches!(err, GeometryError::EmptyDimensions { width: 0, height: 4, .. }));
    }

    #[test]
    fn test_source_row_and_index() {
        let pixels: Vec<u8> = (0..12).collect();
        let source = SourceImage::new(&pixels, 4, 3).unwrap();
        assert_eq!(source.row(1), &[4, 5, 6, 7]);
        assert_eq!(source.index_at(3, 2), 11);
    }

    #[test]
    fn test_destination_rejects_wrong_length() {
        let mut pixels = vec![0u32; 10];
        let err = Destination::new(&mut pixels, 3, 3).unwrap_err();
        assert_eq!(err, GeometryError::length("destination", 9, 10));
    }

    #[test]
    fn test_viewport_extents() {
        let viewport = Viewport::new(2.0, 6.0, 1.0, 4.0);
        assert_eq!(viewport.width(), 4.0);
        assert_eq!(viewport.height(), 3.0);
        assert!(viewport.has_area());
        assert!(!Viewport::new(5.0, 5.0, 0.0, 1.0).has_area());
        assert!(!Viewport::new(0.0, f64::NAN, 0.0, 1.0).has_area());
    }

    #[test]
    fn test_viewport_parse() {
        let viewport: Viewport = "0, 10.5,2,8".parse().unwrap();
        assert_eq!(viewport, Viewport::new(0.0, 10.5, 2.0, 8.0));
        assert!("1,2,3".parse::<Viewport>().is_err());
        assert!("a,b,c,d".parse::<Viewport>().is_err());
    }
}
