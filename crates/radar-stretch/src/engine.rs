//! Resample engine: strategy selection and the public entrypoints.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::decimate;
use crate::error::{GeometryError, StretchError};
use crate::interp;
use crate::palette::{Palette, RenderMode, PALETTE_SIZE};
use crate::source::{Destination, SourceImage, Viewport};

/// Sampling strategy chosen for a resample call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMode {
    /// Destination at least twice as wide as the viewport: bilinear quads.
    Interpolate,
    /// Everything else: fixed-point nearest neighbor.
    Decimate,
}

impl SamplingMode {
    /// Pick the strategy for a viewport and destination width.
    ///
    /// Only the horizontal magnification is compared.
    pub fn select(viewport: &Viewport, dest_width: u32) -> Self {
        if viewport.width() * 2.0 < dest_width as f64 {
            Self::Interpolate
        } else {
            Self::Decimate
        }
    }
}

impl std::fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Interpolate => f.write_str("interpolate"),
            Self::Decimate => f.write_str("decimate"),
        }
    }
}

/// Resample `viewport` of `source` into `dest` using the `mode` palette table.
///
/// Geometry is validated when `source` and `dest` are constructed, so this
/// cannot fail on buffers it is handed. Pixels outside the region the chosen
/// sampler reaches keep their previous value.
pub fn resample(
    source: &SourceImage<'_>,
    palette: &Palette,
    mode: RenderMode,
    viewport: &Viewport,
    dest: &mut Destination<'_>,
) -> SamplingMode {
    resample_with_table(source, palette.table(mode), mode.blank_threshold(), viewport, dest)
}

pub(crate) fn resample_with_table(
    source: &SourceImage<'_>,
    table: &[u32; PALETTE_SIZE],
    blank_threshold: u8,
    viewport: &Viewport,
    dest: &mut Destination<'_>,
) -> SamplingMode {
    let sampling = SamplingMode::select(viewport, dest.width());
    debug!(
        sampling = %sampling,
        source_width = source.width(),
        source_height = source.height(),
        dest_width = dest.width(),
        dest_height = dest.height(),
        left = viewport.left,
        right = viewport.right,
        top = viewport.top,
        bottom = viewport.bottom,
        "Resampling viewport"
    );

    match sampling {
        SamplingMode::Interpolate => {
            interp::interpolate_viewport(source, table, blank_threshold, viewport, dest)
        }
        SamplingMode::Decimate => decimate::sample_viewport(source, table, viewport, dest),
    }
    sampling
}

fn palette_table<'a>(table: &'a [u32], name: &'static str) -> Result<&'a [u32; PALETTE_SIZE], GeometryError> {
    table
        .try_into()
        .map_err(|_| GeometryError::PaletteLength {
            table: name,
            got: table.len(),
        })
}

type CheckedBuffers<'s, 'd> = (
    &'s [u32; PALETTE_SIZE],
    &'s [u32; PALETTE_SIZE],
    SourceImage<'s>,
    Destination<'d>,
);

#[allow(clippy::too_many_arguments)]
fn validate_buffers<'s, 'd>(
    source_pixels: &'s [u8],
    source_width: u32,
    source_height: u32,
    unfiltered_palette: &'s [u32],
    filtered_palette: &'s [u32],
    dest_buffer: &'d mut [u32],
    dest_width: u32,
    dest_height: u32,
) -> Result<CheckedBuffers<'s, 'd>, GeometryError> {
    let unfiltered = palette_table(unfiltered_palette, "unfiltered")?;
    let filtered = palette_table(filtered_palette, "filtered")?;
    let source = SourceImage::new(source_pixels, source_width, source_height)?;
    let dest = Destination::new(dest_buffer, dest_width, dest_height)?;
    Ok((unfiltered, filtered, source, dest))
}

/// Flat entrypoint over raw buffers.
///
/// Every buffer is validated before anything is written; on error
/// `dest_buffer` is left byte-for-byte unchanged.
#[allow(clippy::too_many_arguments)]
pub fn stretch(
    source_pixels: &[u8],
    source_width: u32,
    source_height: u32,
    unfiltered_palette: &[u32],
    filtered_palette: &[u32],
    viewport_left: f64,
    viewport_right: f64,
    viewport_top: f64,
    viewport_bottom: f64,
    dest_width: u32,
    dest_height: u32,
    filtered: bool,
    dest_buffer: &mut [u32],
) -> Result<SamplingMode, StretchError> {
    let checked = validate_buffers(
        source_pixels,
        source_width,
        source_height,
        unfiltered_palette,
        filtered_palette,
        dest_buffer,
        dest_width,
        dest_height,
    );
    let (unfiltered, filtered_table, source, mut dest) = match checked {
        Ok(parts) => parts,
        Err(e) => {
            warn!(error = %e, "Rejected stretch request");
            return Err(e.into());
        }
    };

    let mode = RenderMode::from_filtered(filtered);
    let table = match mode {
        RenderMode::Filtered => filtered_table,
        RenderMode::Unfiltered => unfiltered,
    };
    let viewport = Viewport::new(viewport_left, viewport_right, viewport_top, viewport_bottom);

    Ok(resample_with_table(
        &source,
        table,
        mode.blank_threshold(),
        &viewport,
        &mut dest,
    ))
}
