//! PNG encoding for stretched frames.
//!
//! Two encoding modes:
//! - **RGBA PNG (color type 6)**: for destination buffers of packed pixels.
//! - **Indexed PNG (color type 3)**: for whole frames, written straight from
//!   the palette indices with the chosen table as PLTE/tRNS.
//!
//! Packed pixels carry red in the low byte, so their little-endian bytes are
//! already in RGBA order.

use std::io::Write;

use crate::frame::Frame;
use crate::palette::{RenderMode, PALETTE_SIZE};

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Create an RGBA PNG from packed destination pixels.
pub fn create_png_rgba(pixels: &[u32], width: usize, height: usize) -> Result<Vec<u8>, String> {
    if pixels.len() != width * height {
        return Err(format!(
            "pixel buffer holds {} pixels, expected {}x{}",
            pixels.len(),
            width,
            height
        ));
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 6));

    let idat_data =
        deflate_idat_rgba(pixels, width, height).map_err(|e| format!("IDAT compression failed: {}", e))?;
    write_chunk(&mut png, b"IDAT", &idat_data);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Create an indexed PNG (color type 3) from packed palette colors and indices.
///
/// A tRNS chunk is written when any color is not fully opaque.
pub fn create_png_indexed(
    width: usize,
    height: usize,
    colors: &[u32],
    indices: &[u8],
) -> Result<Vec<u8>, String> {
    if colors.is_empty() || colors.len() > PALETTE_SIZE {
        return Err(format!("palette must hold 1..=256 colors, got {}", colors.len()));
    }
    if indices.len() != width * height {
        return Err(format!(
            "index buffer holds {} pixels, expected {}x{}",
            indices.len(),
            width,
            height
        ));
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 3));

    let mut plte_data = Vec::with_capacity(colors.len() * 3);
    for color in colors {
        let [r, g, b, _] = color.to_le_bytes();
        plte_data.extend_from_slice(&[r, g, b]);
    }
    write_chunk(&mut png, b"PLTE", &plte_data);

    if colors.iter().any(|c| (c >> 24) < 255) {
        let trns_data: Vec<u8> = colors.iter().map(|c| (c >> 24) as u8).collect();
        write_chunk(&mut png, b"tRNS", &trns_data);
    }

    let idat_data = deflate_idat_indexed(indices, width, height)
        .map_err(|e| format!("IDAT compression failed: {}", e))?;
    write_chunk(&mut png, b"IDAT", &idat_data);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Encode a whole frame through one of its palette tables, at native size.
pub fn create_png_from_frame(frame: &Frame, mode: RenderMode) -> Result<Vec<u8>, String> {
    create_png_indexed(
        frame.width() as usize,
        frame.height() as usize,
        frame.palette().table(mode),
        frame.pixels(),
    )
}

fn ihdr(width: usize, height: usize, color_type: u8) -> [u8; 13] {
    let mut data = [0u8; 13];
    data[0..4].copy_from_slice(&(width as u32).to_be_bytes());
    data[4..8].copy_from_slice(&(height as u32).to_be_bytes());
    data[8] = 8; // bit depth
    data[9] = color_type;
    // compression, filter and interlace methods stay 0
    data
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

fn deflate_idat_indexed(
    indices: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut uncompressed = Vec::with_capacity(height * (1 + width));
    for row in indices.chunks_exact(width.max(1)).take(height) {
        uncompressed.push(0); // filter type: none
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&uncompressed)?;
    Ok(encoder.finish()?)
}

fn deflate_idat_rgba(
    pixels: &[u32],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut uncompressed = Vec::with_capacity(height * (1 + width * 4));
    for row in pixels.chunks_exact(width.max(1)).take(height) {
        uncompressed.push(0);
        for pixel in row {
            uncompressed.extend_from_slice(&pixel.to_le_bytes());
        }
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&uncompressed)?;
    Ok(encoder.finish()?)
}
