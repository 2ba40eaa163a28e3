//! Magnification path: bilinear shading of each source cell in fixed point.
//!
//! Every source pixel cell maps onto a destination quad. The four corner
//! intensities of the cell are clamped, shifted into fixed point, clipped
//! against the destination rectangle, and then interpolated across the quad.
//! Interpolated values are palette indices, so the palette lookup happens per
//! destination pixel after rounding.
//!
//! Increments are pre-divided integers. Output matches a fixed-point
//! rasterizer, not a floating-point bilinear filter.

use tracing::trace;

use crate::source::{Destination, SourceImage, Viewport};

/// Fixed-point scale of interpolated intensities.
pub const SHIFT: u32 = 20;

/// Highest intensity carried into interpolation.
pub const INTENSITY_CEILING: u8 = 22;

const ROUND: i64 = 1 << (SHIFT - 1);

/// Fixed-point corner values of one quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadCorners {
    pub ul: i64,
    pub ur: i64,
    pub bl: i64,
    pub br: i64,
}

/// A quad after clipping: corners plus its destination rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClippedQuad {
    pub corners: QuadCorners,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Destination-space quad for one source cell, before clipping.
///
/// Spans are half-open: `[x1, x2) x [y1, y2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellQuad {
    pub corners: QuadCorners,
    pub x1: i64,
    pub x2: i64,
    pub y1: i64,
    pub y2: i64,
}

/// `a + (b - a) * num / den`, truncating like the fill increments.
#[inline]
fn lerp_fixed(a: i64, b: i64, num: i128, den: i128) -> i64 {
    (a as i128 + (b as i128 - a as i128) * num / den) as i64
}

impl CellQuad {
    /// Clip against `[0, dest_width) x [0, dest_height)`.
    ///
    /// Corners moved by the clip take the value of the edge they slide along
    /// at the boundary. Returns `None` when nothing of the quad is visible.
    pub fn clip(&self, dest_width: i64, dest_height: i64) -> Option<ClippedQuad> {
        if self.x2 <= self.x1 || self.y2 <= self.y1 {
            return None;
        }
        if self.x2 <= 0 || self.y2 <= 0 || self.x1 >= dest_width || self.y1 >= dest_height {
            return None;
        }

        let QuadCorners { ul, ur, bl, br } = self.corners;
        let span_y = self.y2 as i128 - self.y1 as i128;
        let (mut top_l, mut top_r, mut bot_l, mut bot_r) = (ul, ur, bl, br);
        let (mut y1, mut y2) = (self.y1, self.y2);

        if y1 < 0 {
            let cut = -(y1 as i128);
            top_l = lerp_fixed(ul, bl, cut, span_y);
            top_r = lerp_fixed(ur, br, cut, span_y);
            y1 = 0;
        }
        if y2 > dest_height {
            let cut = y2 as i128 - dest_height as i128;
            bot_l = lerp_fixed(bl, ul, cut, span_y);
            bot_r = lerp_fixed(br, ur, cut, span_y);
            y2 = dest_height;
        }

        let span_x = self.x2 as i128 - self.x1 as i128;
        let (ul, ur, bl, br) = (top_l, top_r, bot_l, bot_r);
        let (mut x1, mut x2) = (self.x1, self.x2);

        if x1 < 0 {
            let cut = -(x1 as i128);
            top_l = lerp_fixed(ul, ur, cut, span_x);
            bot_l = lerp_fixed(bl, br, cut, span_x);
            x1 = 0;
        }
        if x2 > dest_width {
            let cut = x2 as i128 - dest_width as i128;
            top_r = lerp_fixed(ur, ul, cut, span_x);
            bot_r = lerp_fixed(br, bl, cut, span_x);
            x2 = dest_width;
        }

        if x2 <= x1 || y2 <= y1 {
            return None;
        }

        Some(ClippedQuad {
            corners: QuadCorners {
                ul: top_l,
                ur: top_r,
                bl: bot_l,
                br: bot_r,
            },
            x: x1 as usize,
            y: y1 as usize,
            width: (x2 - x1) as usize,
            height: (y2 - y1) as usize,
        })
    }
}

/// Shade a `width x height` quad into `output`.
///
/// `offset` is the index of the quad's top-left pixel and `stride` the
/// number of words between rows. The caller guarantees the quad fits.
pub fn fill_quad(
    corners: QuadCorners,
    width: usize,
    height: usize,
    output: &mut [u32],
    offset: usize,
    stride: usize,
    palette: &[u32; 256],
) {
    if width == 0 || height == 0 {
        return;
    }
    let QuadCorners { ul, ur, bl, br } = corners;
    let (w, h) = (width as i64, height as i64);

    let left_incr = (bl - ul) / h;
    let right_incr = (br - ur) / h;

    let mut horiz_incr = (ur - ul) / w;
    let side_delta_incr = (right_incr - left_incr) / w;

    let mut left = ul;
    for y in 0..height {
        let start = offset + y * stride;
        let mut val = left;
        for px in &mut output[start..start + width] {
            *px = palette[(((val + ROUND) >> SHIFT) & 0xff) as usize];
            val += horiz_incr;
        }
        horiz_incr += side_delta_incr;
        left += left_incr;
    }
}

/// Clamp a truncated viewport bound to `[0, len - 1]`.
#[inline]
fn clamp_bound(value: f64, len: u32) -> i64 {
    (value as i64).clamp(0, len as i64 - 1)
}

/// Map a source-space offset to a destination coordinate, truncating toward zero.
#[inline]
fn to_dest(offset: f64, ratio: f64) -> i64 {
    (offset * ratio) as i64
}

/// Render a magnified viewport by interpolating every visible source cell.
///
/// `floor` is the lowest intensity carried into interpolation; it is the
/// render mode's blank threshold, so blanked cells fade to transparent.
/// Viewports without positive area write nothing.
pub fn interpolate_viewport(
    source: &SourceImage<'_>,
    palette: &[u32; 256],
    floor: u8,
    viewport: &Viewport,
    dest: &mut Destination<'_>,
) {
    if !viewport.has_area() {
        trace!(?viewport, "Viewport has no area, nothing to interpolate");
        return;
    }

    let floor = floor.min(INTENSITY_CEILING);
    let src_w = source.width() as i64;
    let src_h = source.height() as i64;
    let dest_w = dest.width() as i64;
    let dest_h = dest.height() as i64;
    let stride = dest.width() as usize;

    let min_in_x = clamp_bound(viewport.left, source.width());
    let max_in_x = clamp_bound(viewport.right, source.width());
    let min_in_y = clamp_bound(viewport.top, source.height());
    let max_in_y = clamp_bound(viewport.bottom, source.height());

    let height_ratio = dest.height() as f64 / viewport.height();
    let width_ratio = dest.width() as f64 / viewport.width();

    // Neighbors past the last row/column repeat the edge.
    let intensity = |x: i64, y: i64| -> i64 {
        let index = source.index_at(x.min(src_w - 1) as usize, y.min(src_h - 1) as usize);
        (index.clamp(floor, INTENSITY_CEILING) as i64) << SHIFT
    };

    let output = dest.pixels_mut();
    let mut out_y2 = to_dest(min_in_y as f64 - viewport.top, height_ratio);

    for in_y in min_in_y..=max_in_y {
        let out_y1 = out_y2;
        out_y2 = to_dest((in_y + 1) as f64 - viewport.top, height_ratio);

        if out_y1 >= dest_h {
            break;
        }

        let mut ur = intensity(min_in_x, in_y);
        let mut br = intensity(min_in_x, in_y + 1);
        let mut out_x2 = to_dest(min_in_x as f64 - viewport.left, width_ratio);

        for in_x in min_in_x..=max_in_x {
            // This quad's left edge is the previous quad's right edge.
            let ul = ur;
            let bl = br;
            ur = intensity(in_x + 1, in_y);
            br = intensity(in_x + 1, in_y + 1);

            let out_x1 = out_x2;
            out_x2 = to_dest((in_x + 1) as f64 - viewport.left, width_ratio);

            let quad = CellQuad {
                corners: QuadCorners { ul, ur, bl, br },
                x1: out_x1,
                x2: out_x2,
                y1: out_y1,
                y2: out_y2,
            };
            if let Some(clipped) = quad.clip(dest_w, dest_h) {
                fill_quad(
                    clipped.corners,
                    clipped.width,
                    clipped.height,
                    output,
                    clipped.x + clipped.y * stride,
                    stride,
                    palette,
                );
            }
        }
    }
}
