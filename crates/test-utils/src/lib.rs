//! Shared test utilities for the radar-blobber workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Test data path helpers
//! - Skip macros for optional sample frames
//! - Index image generators and an in-memory GIF encoder
//! - Radar color tables and viewports
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Macro to skip a test if the required file is not found.
///
/// Real radar frames are large and are not checked in; tests that need one
/// print a skip message and return early when it is missing.
///
/// ```ignore
/// use test_utils::require_test_file;
///
/// #[test]
/// fn test_real_frame() {
///     let path = require_test_file!("n0r_sample.gif");
///     // Test code using path...
/// }
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        match $crate::find_test_file($name) {
            Some(path) => path,
            None => {
                eprintln!(
                    "SKIPPED: Test file '{}' not found. Download test data or set TEST_DATA_DIR.",
                    $name
                );
                return;
            }
        }
    }};
}

/// Assert that two packed pixel buffers are equal, reporting the first
/// differing pixel as `(x, y)` in hex.
#[macro_export]
macro_rules! assert_pixels_eq {
    ($left:expr, $right:expr, $width:expr) => {{
        let left: &[u32] = &$left;
        let right: &[u32] = &$right;
        let width: usize = $width as usize;
        assert_eq!(left.len(), right.len(), "pixel buffers differ in length");
        if let Some(i) = left.iter().zip(right.iter()).position(|(a, b)| a != b) {
            panic!(
                "pixel buffers differ at ({}, {}):\n  left: `{:#010x}`,\n right: `{:#010x}`",
                i % width,
                i / width,
                left[i],
                right[i]
            );
        }
    }};
}
