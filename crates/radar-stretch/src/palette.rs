//! Filtered and unfiltered lookup tables built from a raw color table.
//!
//! Low radar intensities are noise, so both tables blank out everything at or
//! below a mode-specific index. The filtered table blanks more aggressively.

use serde::{Deserialize, Serialize};

/// Number of entries in every lookup table.
pub const PALETTE_SIZE: usize = 256;

/// High-byte marker packed into every valid color.
pub const ALPHA_MARKER: u32 = 0x4000_0000;

/// Alpha used for raw, un-blanked color table entries.
pub const OPAQUE_ALPHA: u32 = 0xff00_0000;

/// Unfiltered entries at or below this index are forced to 0.
pub const UNFILTERED_BLANK_OUT_UNTIL: u8 = 6;

/// Filtered entries at or below this index are forced to 0.
pub const FILTERED_BLANK_OUT_UNTIL: u8 = 9;

/// A raw `[r, g, b]` color table entry.
pub type Rgb = [u8; 3];

/// Which of the two palette tables a render uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Unfiltered,
    Filtered,
}

impl RenderMode {
    pub fn from_filtered(filtered: bool) -> Self {
        if filtered {
            Self::Filtered
        } else {
            Self::Unfiltered
        }
    }

    pub fn is_filtered(self) -> bool {
        self == Self::Filtered
    }

    /// Highest blanked index. Also the intensity floor used when
    /// interpolating magnified cells.
    pub fn blank_threshold(self) -> u8 {
        match self {
            Self::Unfiltered => UNFILTERED_BLANK_OUT_UNTIL,
            Self::Filtered => FILTERED_BLANK_OUT_UNTIL,
        }
    }
}

/// Pack an RGB triple with the given alpha bits, red in the low byte.
#[inline(always)]
pub fn pack_rgb(color: Rgb, alpha: u32) -> u32 {
    (color[0] as u32) | ((color[1] as u32) << 8) | ((color[2] as u32) << 16) | alpha
}

/// Immutable pair of lookup tables for one decoded frame.
#[derive(Clone, PartialEq, Eq)]
pub struct Palette {
    unfiltered: [u32; PALETTE_SIZE],
    filtered: [u32; PALETTE_SIZE],
}

impl Palette {
    /// Build both tables from the first `color_count` entries of `raw_colors`.
    ///
    /// `color_count` is clamped to the table size and to the number of colors
    /// actually supplied. Everything past it stays 0.
    pub fn build(raw_colors: &[Rgb], color_count: usize) -> Self {
        let count = color_count.min(PALETTE_SIZE).min(raw_colors.len());
        let mut unfiltered = [0u32; PALETTE_SIZE];
        let mut filtered = [0u32; PALETTE_SIZE];

        for (i, &color) in raw_colors.iter().take(count).enumerate() {
            let packed = pack_rgb(color, ALPHA_MARKER);
            if i > UNFILTERED_BLANK_OUT_UNTIL as usize {
                unfiltered[i] = packed;
            }
            if i > FILTERED_BLANK_OUT_UNTIL as usize {
                filtered[i] = packed;
            }
        }

        Self {
            unfiltered,
            filtered,
        }
    }

    /// A palette with every entry 0. Renders nothing visible.
    pub fn empty() -> Self {
        Self {
            unfiltered: [0; PALETTE_SIZE],
            filtered: [0; PALETTE_SIZE],
        }
    }

    /// Wrap tables that were built elsewhere.
    pub fn from_tables(unfiltered: [u32; PALETTE_SIZE], filtered: [u32; PALETTE_SIZE]) -> Self {
        Self {
            unfiltered,
            filtered,
        }
    }

    pub fn unfiltered(&self) -> &[u32; PALETTE_SIZE] {
        &self.unfiltered
    }

    pub fn filtered(&self) -> &[u32; PALETTE_SIZE] {
        &self.filtered
    }

    pub fn table(&self, mode: RenderMode) -> &[u32; PALETTE_SIZE] {
        match mode {
            RenderMode::Unfiltered => &self.unfiltered,
            RenderMode::Filtered => &self.filtered,
        }
    }

    /// Split into `(unfiltered, filtered)` tables.
    pub fn into_tables(self) -> ([u32; PALETTE_SIZE], [u32; PALETTE_SIZE]) {
        (self.unfiltered, self.filtered)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible = |table: &[u32; PALETTE_SIZE]| table.iter().filter(|&&c| c != 0).count();
        f.debug_struct("Palette")
            .field("unfiltered_visible", &visible(&self.unfiltered))
            .field("filtered_visible", &visible(&self.filtered))
            .finish()
    }
}

/// Build `(unfiltered, filtered)` lookup tables from a raw color table.
pub fn build_palette(raw_colors: &[Rgb], color_count: usize) -> ([u32; PALETTE_SIZE], [u32; PALETTE_SIZE]) {
    Palette::build(raw_colors, color_count).into_tables()
}
