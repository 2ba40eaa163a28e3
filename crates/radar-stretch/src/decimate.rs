//! Zoom-out path: nearest-neighbor sampling with a fixed-point column walk.

use crate::source::{Destination, SourceImage, Viewport};

/// Fixed-point scale of the column accumulator.
pub const ZOOM_OUT_SHIFT: u32 = 15;

const ZOOM_OUT_SCALE: f64 = (1u32 << ZOOM_OUT_SHIFT) as f64;

/// Round half up to an integer.
#[inline]
fn round_fixed(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Sample `viewport` into `dest`, one destination pixel at a time.
///
/// Rows mapping above the source are skipped; the first row mapping below it
/// ends sampling. Columns outside the source are left untouched.
pub fn sample_viewport(
    source: &SourceImage<'_>,
    palette: &[u32; 256],
    viewport: &Viewport,
    dest: &mut Destination<'_>,
) {
    let dest_w = dest.width() as usize;
    let dest_h = dest.height() as f64;
    let src_w = source.width() as i64;
    let src_h = source.height() as f64;
    let view_height = viewport.height();

    let x_step = round_fixed(viewport.width() / dest_w as f64 * ZOOM_OUT_SCALE);
    let in_x_initial = round_fixed(viewport.left * ZOOM_OUT_SCALE);

    for (out_y, row) in dest.pixels_mut().chunks_exact_mut(dest_w).enumerate() {
        let in_y = (out_y as f64 * view_height / dest_h + viewport.top).floor();
        // Also skips NaN rows.
        if !(in_y >= 0.0) {
            continue;
        }
        if in_y >= src_h {
            break;
        }

        let scan_line = source.row(in_y as usize);
        let mut in_x_shifted = in_x_initial;
        for px in row.iter_mut() {
            let in_x = in_x_shifted >> ZOOM_OUT_SHIFT;
            if (0..src_w).contains(&in_x) {
                *px = palette[scan_line[in_x as usize] as usize];
            }
            in_x_shifted = in_x_shifted.saturating_add(x_step);
        }
    }
}
