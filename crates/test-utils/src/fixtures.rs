//! Common test fixtures for radar frame tests.

/// Color table shaped like a base-reflectivity radar product.
///
/// Index 0 is background, indices 1..=6 are low-return noise levels, and the
/// remaining entries follow the usual reflectivity ramp up to index 22.
pub const RADAR_COLORS: [[u8; 3]; 23] = [
    [0, 0, 0],       // background
    [40, 40, 40],    // noise
    [50, 50, 50],
    [60, 60, 60],
    [70, 70, 70],
    [80, 80, 80],
    [90, 90, 90],
    [4, 233, 231],   // 5 dBZ
    [1, 159, 244],   // 10 dBZ
    [3, 0, 244],     // 15 dBZ
    [2, 253, 2],     // 20 dBZ
    [1, 197, 1],     // 25 dBZ
    [0, 142, 0],     // 30 dBZ
    [253, 248, 2],   // 35 dBZ
    [229, 188, 0],   // 40 dBZ
    [253, 149, 0],   // 45 dBZ
    [253, 0, 0],     // 50 dBZ
    [212, 0, 0],     // 55 dBZ
    [188, 0, 0],     // 60 dBZ
    [248, 0, 253],   // 65 dBZ
    [152, 84, 198],  // 70 dBZ
    [253, 253, 253], // 75 dBZ
    [255, 255, 255], // top of scale
];

/// Four-color table matching a 2x2 test image with indices `[0, 1, 2, 3]`.
pub const FOUR_COLORS: [[u8; 3]; 4] = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]];

/// Common viewports as `(left, right, top, bottom)` in source pixel units.
pub mod viewport {
    /// The full 4x4 test image.
    pub const FULL_4X4: (f64, f64, f64, f64) = (0.0, 4.0, 0.0, 4.0);

    /// A 2x2 window in the middle of a 4x4 image.
    pub const CENTER_2X2: (f64, f64, f64, f64) = (1.0, 3.0, 1.0, 3.0);

    /// Entirely to the right of any image narrower than 100 pixels.
    pub const FAR_RIGHT: (f64, f64, f64, f64) = (100.0, 104.0, 0.0, 4.0);

    /// Zero-width window.
    pub const DEGENERATE: (f64, f64, f64, f64) = (2.0, 2.0, 0.0, 4.0);
}
