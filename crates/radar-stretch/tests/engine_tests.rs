//! End-to-end resampling through the flat entrypoint and the typed API.
//!
//! Most tests use an "index table" where entry `i` is `0x100 + i`, so the
//! expected output can be read back as source intensities.

use radar_stretch::{
    pack_rgb, resample, stretch, Destination, GeometryError, Palette, RenderMode, SamplingMode, SourceImage,
    StretchError, Viewport, ALPHA_MARKER,
};
use test_utils::{assert_pixels_eq, checkerboard_indices, ramp_indices, sequential_indices, RADAR_COLORS};

// ============================================================================
// Helper functions
// ============================================================================

fn index_table() -> Vec<u32> {
    (0..256).map(|i| 0x100 + i as u32).collect()
}

fn expected_row(indices: &[u32]) -> Vec<u32> {
    indices.iter().map(|i| 0x100 + i).collect()
}

/// Stretch with the index table for both modes.
fn run(
    pixels: &[u8],
    (sw, sh): (u32, u32),
    (left, right, top, bottom): (f64, f64, f64, f64),
    (dw, dh): (u32, u32),
    filtered: bool,
    dest: &mut [u32],
) -> Result<SamplingMode, StretchError> {
    let table = index_table();
    stretch(pixels, sw, sh, &table, &table, left, right, top, bottom, dw, dh, filtered, dest)
}

// ============================================================================
// Decimation
// ============================================================================

#[test]
fn test_identity_decimation_4x4() {
    let pixels = sequential_indices(4, 4);
    let mut dest = vec![0u32; 16];
    let mode = run(&pixels, (4, 4), (0.0, 4.0, 0.0, 4.0), (4, 4), false, &mut dest).unwrap();

    assert_eq!(mode, SamplingMode::Decimate);
    let expected: Vec<u32> = pixels.iter().map(|&p| 0x100 + p as u32).collect();
    assert_pixels_eq!(dest, expected, 4);
}

#[test]
fn test_identity_with_built_palette() {
    let pixels = sequential_indices(4, 4);
    let source = SourceImage::new(&pixels, 4, 4).unwrap();
    let palette = Palette::build(&RADAR_COLORS, RADAR_COLORS.len());

    let mut buf = vec![0xdead_beefu32; 16];
    let mut dest = Destination::new(&mut buf, 4, 4).unwrap();
    resample(&source, &palette, RenderMode::Filtered, &Viewport::full(4, 4), &mut dest);

    for (i, &px) in buf.iter().enumerate() {
        if i <= 9 {
            assert_eq!(px, 0, "index {} should be blanked", i);
        } else {
            assert_eq!(px, pack_rgb(RADAR_COLORS[i], ALPHA_MARKER));
        }
    }
}

#[test]
fn test_single_pixel_destination() {
    let pixels = sequential_indices(4, 4);
    let mut dest = vec![0xffff_ffffu32];
    let mode = run(&pixels, (4, 4), (0.0, 4.0, 0.0, 4.0), (1, 1), false, &mut dest).unwrap();
    assert_eq!(mode, SamplingMode::Decimate);
    assert_eq!(dest, vec![0x100]);
}

#[test]
fn test_single_pixel_destination_magnified_viewport() {
    let pixels = sequential_indices(4, 4);
    let mut dest = vec![0xffff_ffffu32];
    // Viewport narrower than half a pixel selects interpolation.
    let mode = run(&pixels, (4, 4), (1.0, 1.25, 1.0, 1.25), (1, 1), false, &mut dest).unwrap();
    assert_eq!(mode, SamplingMode::Interpolate);
    assert_ne!(dest[0], 0xffff_ffff);
}

#[test]
fn test_decimation_is_deterministic() {
    let pixels = checkerboard_indices(64, 64, 3, 8, 20);
    let mut first = vec![0u32; 50 * 30];
    let mut second = vec![0u32; 50 * 30];
    run(&pixels, (64, 64), (3.3, 61.7, 2.1, 60.9), (50, 30), true, &mut first).unwrap();
    run(&pixels, (64, 64), (3.3, 61.7, 2.1, 60.9), (50, 30), true, &mut second).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Interpolation
// ============================================================================

#[test]
fn test_uniform_source_magnifies_uniformly() {
    let pixels = vec![12u8; 4];
    let mut dest = vec![0u32; 64];
    let mode = run(&pixels, (2, 2), (0.0, 2.0, 0.0, 2.0), (8, 8), false, &mut dest).unwrap();
    assert_eq!(mode, SamplingMode::Interpolate);
    assert!(dest.iter().all(|&p| p == 0x100 + 12));
}

#[test]
fn test_ramp_is_smooth_when_magnified() {
    let pixels = vec![10u8, 14];
    let mut dest = vec![0u32; 8 * 4];
    let mode = run(&pixels, (2, 1), (0.0, 2.0, 0.0, 1.0), (8, 4), false, &mut dest).unwrap();

    assert_eq!(mode, SamplingMode::Interpolate);
    let row = expected_row(&[10, 11, 12, 13, 14, 14, 14, 14]);
    for chunk in dest.chunks(8) {
        assert_eq!(chunk, &row[..]);
    }
}

#[test]
fn test_fractional_viewport_clips_first_row_and_column() {
    // Intensity 10 + 2x + 4y, so both clipped edges carry a gradient.
    let pixels: Vec<u8> = (0..3u8).flat_map(|y| (0..3u8).map(move |x| 10 + 2 * x + 4 * y)).collect();
    let mut dest = vec![0u32; 6 * 6];
    let mode = run(&pixels, (3, 3), (0.5, 2.0, 0.5, 2.0), (6, 6), false, &mut dest).unwrap();

    assert_eq!(mode, SamplingMode::Interpolate);
    assert_eq!(&dest[..6], &expected_row(&[13, 14, 14, 15, 15, 16])[..]);
    assert_eq!(&dest[6..12], &expected_row(&[14, 15, 15, 16, 16, 17])[..]);

    let first_column: Vec<u32> = (0..6).map(|y| dest[y * 6]).collect();
    assert_eq!(first_column, expected_row(&[13, 14, 15, 16, 17, 18]));
}

#[test]
fn test_ramp_is_blocky_when_decimated() {
    let pixels = ramp_indices(8, 1, 10, 17);
    let mut dest = vec![0u32; 4];
    let mode = run(&pixels, (8, 1), (0.0, 8.0, 0.0, 1.0), (4, 1), false, &mut dest).unwrap();

    assert_eq!(mode, SamplingMode::Decimate);
    assert_eq!(dest, expected_row(&[10, 12, 14, 16]));
}

#[test]
fn test_filtered_mode_raises_interpolation_floor() {
    let pixels = vec![4u8, 14];

    let mut unfiltered = vec![0u32; 8];
    run(&pixels, (2, 1), (0.0, 2.0, 0.0, 1.0), (8, 1), false, &mut unfiltered).unwrap();
    assert_eq!(unfiltered, expected_row(&[6, 8, 10, 12, 14, 14, 14, 14]));

    let mut filtered = vec![0u32; 8];
    run(&pixels, (2, 1), (0.0, 2.0, 0.0, 1.0), (8, 1), true, &mut filtered).unwrap();
    assert_eq!(filtered, expected_row(&[9, 10, 12, 13, 14, 14, 14, 14]));
}

#[test]
fn test_intensities_clamped_to_ceiling() {
    let pixels = vec![200u8; 4];
    let mut dest = vec![0u32; 64];
    run(&pixels, (2, 2), (0.0, 2.0, 0.0, 2.0), (8, 8), false, &mut dest).unwrap();
    assert!(dest.iter().all(|&p| p == 0x100 + 22));
}

#[test]
fn test_corner_fidelity() {
    let pixels = vec![8u8, 20, 16, 12];
    let mut dest = vec![0u32; 40 * 40];
    run(&pixels, (2, 2), (0.0, 2.0, 0.0, 2.0), (40, 40), false, &mut dest).unwrap();

    // The first quad starts exactly on source pixel (0, 0), the second on (1, 0)
    // and the second row of quads on (0, 1).
    assert_eq!(dest[0], 0x100 + 8);
    assert_eq!(dest[20], 0x100 + 20);
    assert_eq!(dest[20 * 40], 0x100 + 16);
    assert_eq!(dest[20 * 40 + 20], 0x100 + 12);
}

// ============================================================================
// Mode selection
// ============================================================================

#[test]
fn test_extreme_aspect_ratio_uses_width_only() {
    // Sixteen times taller than the viewport but not wider: still decimated,
    // so rows repeat instead of blending.
    let pixels = ramp_indices(4, 2, 10, 13);
    let mut dest = vec![0u32; 4 * 16];
    let mode = run(&pixels, (4, 2), (0.0, 4.0, 0.0, 1.0), (4, 16), false, &mut dest).unwrap();

    assert_eq!(mode, SamplingMode::Decimate);
    let row = expected_row(&[10, 11, 12, 13]);
    for chunk in dest.chunks(4) {
        assert_eq!(chunk, &row[..]);
    }
}

// ============================================================================
// Out-of-range viewports
// ============================================================================

#[test]
fn test_viewport_outside_source_leaves_dest_unchanged() {
    let pixels = sequential_indices(4, 4);

    let mut decimated = vec![7u32; 16];
    let mode = run(&pixels, (4, 4), (100.0, 104.0, 0.0, 4.0), (4, 4), false, &mut decimated).unwrap();
    assert_eq!(mode, SamplingMode::Decimate);
    assert!(decimated.iter().all(|&p| p == 7));

    let mut interpolated = vec![7u32; 256];
    let mode = run(&pixels, (4, 4), (100.0, 104.0, 0.0, 4.0), (16, 16), false, &mut interpolated).unwrap();
    assert_eq!(mode, SamplingMode::Interpolate);
    assert!(interpolated.iter().all(|&p| p == 7));
}

#[test]
fn test_viewport_below_source_leaves_dest_unchanged() {
    let pixels = sequential_indices(4, 4);
    let mut dest = vec![7u32; 16];
    run(&pixels, (4, 4), (0.0, 4.0, 10.0, 14.0), (4, 4), false, &mut dest).unwrap();
    assert!(dest.iter().all(|&p| p == 7));
}

#[test]
fn test_degenerate_viewport_writes_nothing() {
    let pixels = sequential_indices(4, 4);
    let mut dest = vec![7u32; 16];
    let mode = run(&pixels, (4, 4), (2.0, 2.0, 0.0, 4.0), (4, 4), false, &mut dest).unwrap();
    assert_eq!(mode, SamplingMode::Interpolate);
    assert!(dest.iter().all(|&p| p == 7));
}

#[test]
fn test_non_finite_viewport_does_not_panic() {
    let pixels = sequential_indices(4, 4);
    let mut dest = vec![7u32; 16];
    run(&pixels, (4, 4), (0.0, f64::NAN, 0.0, 4.0), (4, 4), false, &mut dest).unwrap();
    run(&pixels, (4, 4), (0.0, 4.0, f64::NAN, 4.0), (4, 4), false, &mut dest).unwrap();
    run(&pixels, (4, 4), (f64::NEG_INFINITY, f64::INFINITY, 0.0, 4.0), (4, 4), false, &mut dest).unwrap();
}

// ============================================================================
// Geometry errors
// ============================================================================

#[test]
fn test_short_source_rejected_before_write() {
    let pixels = vec![1u8; 15];
    let mut dest = vec![7u32; 16];
    let err = run(&pixels, (4, 4), (0.0, 4.0, 0.0, 4.0), (4, 4), false, &mut dest).unwrap_err();

    assert!(matches!(
        err,
        StretchError::Geometry(GeometryError::LengthMismatch {
            buffer: "source",
            expected: 16,
            got: 15
        })
    ));
    assert!(dest.iter().all(|&p| p == 7));
}

#[test]
fn test_short_destination_rejected() {
    let pixels = sequential_indices(4, 4);
    let mut dest = vec![7u32; 15];
    let err = run(&pixels, (4, 4), (0.0, 4.0, 0.0, 4.0), (4, 4), false, &mut dest).unwrap_err();
    assert!(err.to_string().contains("not consistent with given width and height"));
    assert!(dest.iter().all(|&p| p == 7));
}

#[test]
fn test_zero_dimensions_rejected() {
    let mut dest = vec![7u32; 4];
    let err = run(&[], (0, 4), (0.0, 4.0, 0.0, 4.0), (2, 2), false, &mut dest).unwrap_err();
    assert!(matches!(
        err,
        StretchError::Geometry(GeometryError::EmptyDimensions { buffer: "source", .. })
    ));
    assert!(dest.iter().all(|&p| p == 7));
}

#[test]
fn test_wrong_palette_length_rejected() {
    let pixels = sequential_indices(4, 4);
    let table = index_table();
    let mut dest = vec![7u32; 16];
    let err = stretch(
        &pixels,
        4,
        4,
        &table,
        &table[..255],
        0.0,
        4.0,
        0.0,
        4.0,
        4,
        4,
        false,
        &mut dest,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        StretchError::Geometry(GeometryError::PaletteLength { table: "filtered", got: 255 })
    ));
    assert!(dest.iter().all(|&p| p == 7));
}
