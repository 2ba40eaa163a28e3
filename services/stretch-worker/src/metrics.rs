//! Request counters and timings for the frame service.
//!
//! Every record call updates both the in-process counters (readable through
//! [`MetricsCollector::snapshot`]) and the `metrics` facade. Without an
//! installed recorder the facade calls do nothing.

use metrics::{counter, histogram};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use radar_stretch::SamplingMode;

#[derive(Debug, Default)]
pub struct MetricsCollector {
    decode_requests: AtomicU64,
    decode_errors: AtomicU64,
    stretch_requests: AtomicU64,
    stretch_errors: AtomicU64,
    interpolated: AtomicU64,
    decimated: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub decode_requests: u64,
    pub decode_errors: u64,
    pub stretch_requests: u64,
    pub stretch_errors: u64,
    pub interpolated: u64,
    pub decimated: u64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_decode(&self, elapsed: Duration, ok: bool) {
        self.decode_requests.fetch_add(1, Ordering::Relaxed);
        counter!("decode_requests_total").increment(1);
        histogram!("decode_duration_seconds").record(elapsed.as_secs_f64());
        if !ok {
            self.decode_errors.fetch_add(1, Ordering::Relaxed);
            counter!("decode_errors_total").increment(1);
        }
    }

    pub fn record_stretch(&self, elapsed: Duration, mode: Option<SamplingMode>) {
        self.stretch_requests.fetch_add(1, Ordering::Relaxed);
        counter!("stretch_requests_total").increment(1);
        histogram!("stretch_duration_seconds").record(elapsed.as_secs_f64());
        match mode {
            Some(SamplingMode::Interpolate) => {
                self.interpolated.fetch_add(1, Ordering::Relaxed);
            }
            Some(SamplingMode::Decimate) => {
                self.decimated.fetch_add(1, Ordering::Relaxed);
            }
            None => {
                self.stretch_errors.fetch_add(1, Ordering::Relaxed);
                counter!("stretch_errors_total").increment(1);
            }
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            decode_requests: self.decode_requests.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            stretch_requests: self.stretch_requests.load(Ordering::Relaxed),
            stretch_errors: self.stretch_errors.load(Ordering::Relaxed),
            interpolated: self.interpolated.load(Ordering::Relaxed),
            decimated: self.decimated.load(Ordering::Relaxed),
        }
    }
}
