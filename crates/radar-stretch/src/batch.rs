//! Parallel resampling of many viewports from one source frame.

use rayon::prelude::*;
use tracing::debug;

use crate::engine::{self, SamplingMode};
use crate::error::GeometryError;
use crate::palette::{Palette, RenderMode};
use crate::source::{Destination, SourceImage, Viewport};

/// One destination to fill from the shared source.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub viewport: Viewport,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
    /// Filled in by [`stretch_batch`].
    pub result: Option<Result<SamplingMode, GeometryError>>,
}

impl BatchJob {
    /// A job with a zeroed destination buffer.
    pub fn new(viewport: Viewport, width: u32, height: u32) -> Self {
        Self {
            viewport,
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
            result: None,
        }
    }
}

/// Run every job in parallel against the same source and palette table.
///
/// Jobs are independent; a job whose buffer does not match its dimensions
/// records the error and leaves its pixels alone.
pub fn stretch_batch(source: &SourceImage<'_>, palette: &Palette, mode: RenderMode, jobs: &mut [BatchJob]) {
    debug!(jobs = jobs.len(), mode = ?mode, "Stretching batch");

    jobs.par_iter_mut().for_each(|job| {
        let outcome = Destination::new(&mut job.pixels, job.width, job.height)
            .map(|mut dest| engine::resample(source, palette, mode, &job.viewport, &mut dest));
        job.result = Some(outcome);
    });
}
