//! Test data generators for synthetic radar frames.
//!
//! Index images are row-major `Vec<u8>` buffers of palette indices. The GIF
//! helpers wrap them into real GIF byte streams with the `gif` encoder so
//! decoder tests run against well-formed input.

use std::borrow::Cow;

/// Creates an index image where each pixel holds its position modulo 256.
///
/// ```
/// use test_utils::sequential_indices;
///
/// let pixels = sequential_indices(4, 4);
/// assert_eq!(pixels[5], 5);
/// ```
pub fn sequential_indices(width: usize, height: usize) -> Vec<u8> {
    (0..width * height).map(|i| (i % 256) as u8).collect()
}

/// Creates a horizontal ramp of intensities from `low` at the left edge to
/// `high` at the right edge, identical on every row.
pub fn ramp_indices(width: usize, height: usize, low: u8, high: u8) -> Vec<u8> {
    let span = high.saturating_sub(low) as usize;
    let row: Vec<u8> = (0..width)
        .map(|x| {
            if width <= 1 {
                low
            } else {
                low + (x * span / (width - 1)) as u8
            }
        })
        .collect();
    row.iter().copied().cycle().take(width * height).collect()
}

/// Creates a checkerboard of `a` and `b` with `cell`-pixel squares.
pub fn checkerboard_indices(width: usize, height: usize, cell: usize, a: u8, b: u8) -> Vec<u8> {
    let cell = cell.max(1);
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push(if (x / cell + y / cell) % 2 == 0 { a } else { b });
        }
    }
    data
}

/// Creates an image filled with one index.
pub fn uniform_indices(width: usize, height: usize, index: u8) -> Vec<u8> {
    vec![index; width * height]
}

/// One image descriptor to place in a GIF stream.
#[derive(Debug, Clone)]
pub struct FixtureFrame {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub indices: Vec<u8>,
    /// Local color table; `None` uses the global one.
    pub palette: Option<Vec<[u8; 3]>>,
}

impl FixtureFrame {
    /// A frame covering the whole screen with the global color table.
    pub fn full(width: u16, height: u16, indices: Vec<u8>) -> Self {
        Self {
            left: 0,
            top: 0,
            width,
            height,
            indices,
            palette: None,
        }
    }
}

fn flatten(colors: &[[u8; 3]]) -> Vec<u8> {
    colors.iter().flat_map(|c| c.iter().copied()).collect()
}

/// Encodes a single-frame GIF with a global color table.
///
/// Panics on encoder failure; intended for tests only.
pub fn encode_gif(width: u16, height: u16, colors: &[[u8; 3]], indices: &[u8]) -> Vec<u8> {
    encode_gif_frames(width, height, colors, &[FixtureFrame::full(width, height, indices.to_vec())])
}

/// Encodes a GIF with the given logical screen, global table and frames.
///
/// An empty `global` omits the global color table.
pub fn encode_gif_frames(width: u16, height: u16, global: &[[u8; 3]], frames: &[FixtureFrame]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let global = flatten(global);
        let mut encoder = gif::Encoder::new(&mut out, width, height, &global).expect("gif header");
        for image in frames {
            let mut frame = gif::Frame::default();
            frame.left = image.left;
            frame.top = image.top;
            frame.width = image.width;
            frame.height = image.height;
            frame.buffer = Cow::Borrowed(image.indices.as_slice());
            frame.palette = image.palette.as_deref().map(flatten);
            encoder.write_frame(&frame).expect("gif frame");
        }
    }
    out
}
