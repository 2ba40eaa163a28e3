//! Frame service: decode and stretch work dispatched onto tokio's blocking pool.
//!
//! Each call is one synchronous unit of work. A semaphore bounds how many run
//! at once; callers simply await the returned future.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use gif_decoder::GifDecoder;
use radar_stretch::buffer_pool::with_dest_buffer;
use radar_stretch::png::create_png_rgba;
use radar_stretch::{Decoder, Destination, Frame, RenderMode, SamplingMode, StretchError, Viewport};

use crate::config::WorkerConfig;
use crate::metrics::MetricsCollector;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Stretch(#[from] StretchError),

    #[error("PNG encoding failed: {0}")]
    Png(String),

    #[error("worker task failed: {0}")]
    Join(String),
}

pub type Rendered = Result<(SamplingMode, Vec<u8>), ServiceError>;

/// One viewport to render from a decoded frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StretchRequest {
    pub viewport: Viewport,
    pub width: u32,
    pub height: u32,
    pub filtered: bool,
    /// Destination to write into; must hold `width * height` pixels.
    /// A zeroed buffer is allocated when absent.
    #[serde(skip)]
    pub buffer: Option<Vec<u32>>,
}

impl StretchRequest {
    pub fn new(viewport: Viewport, width: u32, height: u32) -> Self {
        Self {
            viewport,
            width,
            height,
            filtered: false,
            buffer: None,
        }
    }

    pub fn filtered(mut self, filtered: bool) -> Self {
        self.filtered = filtered;
        self
    }

    pub fn with_buffer(mut self, buffer: Vec<u32>) -> Self {
        self.buffer = Some(buffer);
        self
    }

    fn mode(&self) -> RenderMode {
        RenderMode::from_filtered(self.filtered)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StretchResponse {
    pub width: u32,
    pub height: u32,
    pub mode: SamplingMode,
    pub pixels: Vec<u32>,
}

/// Async front end over a [`Decoder`] and the resample engine.
#[derive(Clone)]
pub struct FrameService {
    decoder: Arc<dyn Decoder + Send + Sync>,
    config: WorkerConfig,
    permits: Arc<Semaphore>,
    metrics: Arc<MetricsCollector>,
}

impl FrameService {
    /// Service decoding GIF frames.
    pub fn new(config: WorkerConfig) -> Self {
        Self::with_decoder(config, Arc::new(GifDecoder::new()))
    }

    pub fn with_decoder(config: WorkerConfig, decoder: Arc<dyn Decoder + Send + Sync>) -> Self {
        let permits = Arc::new(Semaphore::new(config.max_concurrency.max(1)));
        info!(
            max_concurrency = config.max_concurrency,
            pool_buffers = config.pool_buffers,
            "Frame service ready"
        );
        Self {
            decoder,
            config,
            permits,
            metrics: Arc::new(MetricsCollector::new()),
        }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// Run `job` on the blocking pool once a permit is free.
    async fn run_blocking<F, T>(&self, job: F) -> Result<T, ServiceError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| ServiceError::Join(e.to_string()))?;
        tokio::task::spawn_blocking(job)
            .await
            .map_err(|e| ServiceError::Join(e.to_string()))
    }

    /// Decode a compressed frame.
    pub async fn decode(&self, bytes: Bytes) -> Result<Arc<Frame>, ServiceError> {
        let start = Instant::now();
        let decoder = Arc::clone(&self.decoder);
        let result = self
            .run_blocking(move || Frame::decode(decoder.as_ref(), &bytes))
            .await
            .and_then(|decoded| decoded.map_err(ServiceError::from));

        self.metrics.record_decode(start.elapsed(), result.is_ok());
        match result {
            Ok(frame) => {
                debug!(width = frame.width(), height = frame.height(), "Frame decoded");
                Ok(Arc::new(frame))
            }
            Err(e) => {
                warn!(error = %e, "Frame decode failed");
                Err(e)
            }
        }
    }

    /// Stretch a viewport of `frame` into the request's buffer.
    ///
    /// A supplied buffer is written in place and returned in the response.
    pub async fn stretch(&self, frame: Arc<Frame>, request: StretchRequest) -> Result<StretchResponse, ServiceError> {
        let start = Instant::now();
        let result = self
            .run_blocking(move || stretch_frame(&frame, request))
            .await
            .and_then(|stretched| stretched.map_err(ServiceError::from));

        self.metrics
            .record_stretch(start.elapsed(), result.as_ref().ok().map(|r| r.mode));
        result.map_err(|e| {
            warn!(error = %e, "Stretch rejected");
            e
        })
    }

    /// Stretch a viewport and encode it as an RGBA PNG.
    pub async fn render_png(&self, frame: Arc<Frame>, request: StretchRequest) -> Result<Vec<u8>, ServiceError> {
        self.render_preview(frame, request).await.map(|(_, png)| png)
    }

    /// Like [`render_png`](Self::render_png), also returning the sampling mode the engine used.
    pub async fn render_preview(&self, frame: Arc<Frame>, request: StretchRequest) -> Rendered {
        let start = Instant::now();
        let pooled = self.config.pool_buffers && request.buffer.is_none();

        let result = self
            .run_blocking(move || -> Rendered {
                if pooled {
                    let (width, height) = (request.width, request.height);
                    with_dest_buffer(width as usize, height as usize, |pixels| -> Rendered {
                        let mut dest = Destination::new(pixels, width, height).map_err(StretchError::from)?;
                        let mode = frame.stretch(request.mode(), &request.viewport, &mut dest);
                        let png = create_png_rgba(pixels, width as usize, height as usize).map_err(ServiceError::Png)?;
                        Ok((mode, png))
                    })
                } else {
                    let response = stretch_frame(&frame, request)?;
                    let png = create_png_rgba(&response.pixels, response.width as usize, response.height as usize)
                        .map_err(ServiceError::Png)?;
                    Ok((response.mode, png))
                }
            })
            .await
            .and_then(|rendered| rendered);

        let (mode, png) = match result {
            Ok(parts) => parts,
            Err(e) => {
                self.metrics.record_stretch(start.elapsed(), None);
                warn!(error = %e, "Preview render failed");
                return Err(e);
            }
        };
        self.metrics.record_stretch(start.elapsed(), Some(mode));
        debug!(bytes = png.len(), sampling = %mode, "Preview rendered");
        Ok((mode, png))
    }
}

fn stretch_frame(frame: &Frame, request: StretchRequest) -> Result<StretchResponse, StretchError> {
    let mode = request.mode();
    let StretchRequest {
        viewport,
        width,
        height,
        buffer,
        ..
    } = request;

    let mut pixels = match buffer {
        Some(buffer) => buffer,
        None => vec![0; width as usize * height as usize],
    };
    let sampling = {
        let mut dest = Destination::new(&mut pixels, width, height)?;
        frame.stretch(mode, &viewport, &mut dest)
    };

    Ok(StretchResponse {
        width,
        height,
        mode: sampling,
        pixels,
    })
}
