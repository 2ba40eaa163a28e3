//! Stretch worker: async dispatch of radar frame decoding and resampling.
//!
//! [`FrameService`] runs decode and stretch calls on tokio's blocking pool,
//! bounded by [`WorkerConfig::max_concurrency`]. The `stretch-worker` binary
//! wraps it in a small CLI.

pub mod cli;
pub mod config;
pub mod metrics;
pub mod service;

pub use config::WorkerConfig;
pub use metrics::{MetricsCollector, MetricsSnapshot};
pub use service::{FrameService, ServiceError, StretchRequest, StretchResponse};
