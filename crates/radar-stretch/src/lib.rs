//! Resampling of indexed-color radar frames into RGBA viewports.
//!
//! A decoded frame is a grid of palette indices (radar intensity levels).
//! Two lookup tables are built per frame, one per [`RenderMode`], and any
//! rectangular viewport of the frame can then be stretched into a
//! destination buffer of packed pixels:
//! - zoomed in (destination more than twice as wide as the viewport): each
//!   source cell is shaded as a bilinear quad in fixed point
//! - otherwise: nearest-neighbor decimation with a fixed-point column walk
//!
//! Low intensity levels are blanked to transparent so the output can be
//! overlaid on a map.

pub mod batch;
pub mod buffer_pool;
pub mod decimate;
pub mod engine;
pub mod error;
pub mod frame;
pub mod interp;
pub mod palette;
pub mod png;
pub mod source;

pub use batch::{stretch_batch, BatchJob};
pub use engine::{resample, stretch, SamplingMode};
pub use error::{DecodeError, GeometryError, Result, StretchError};
pub use frame::{DecodedImage, Decoder, Frame};
pub use palette::{
    build_palette, pack_rgb, Palette, RenderMode, Rgb, ALPHA_MARKER, FILTERED_BLANK_OUT_UNTIL, OPAQUE_ALPHA,
    PALETTE_SIZE, UNFILTERED_BLANK_OUT_UNTIL,
};
pub use source::{Destination, SourceImage, Viewport};
