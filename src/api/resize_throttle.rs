use std::time::{Duration, Instant};

use tracing::trace;

use crate::core::ContainerSize;

/// Rate limiter for container resize samples.
///
/// The first sample after a quiet period passes through immediately. Samples
/// arriving within `interval` of the last emission are coalesced; only the most
/// recent one is kept and it is released by `poll` once the interval elapses,
/// so the final size of a resize burst is never lost.
#[derive(Debug, Clone)]
pub struct ResizeThrottle {
    interval: Duration,
    last_emit: Option<Instant>,
    pending: Option<ContainerSize>,
}

impl ResizeThrottle {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_emit: None,
            pending: None,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Feeds one sample; returns the size to lay out now, if any.
    pub fn on_resize(&mut self, size: ContainerSize, now: Instant) -> Option<ContainerSize> {
        if self.is_open(now) {
            self.pending = None;
            self.last_emit = Some(now);
            return Some(size);
        }
        trace!(
            width = size.width,
            height = size.height,
            "resize sample deferred"
        );
        self.pending = Some(size);
        None
    }

    /// Releases the deferred sample once the interval since the last emission has passed.
    pub fn poll(&mut self, now: Instant) -> Option<ContainerSize> {
        if self.pending.is_none() || !self.is_open(now) {
            return None;
        }
        self.last_emit = Some(now);
        self.pending.take()
    }

    /// Instant at which `poll` will release the deferred sample.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending?;
        self.last_emit.map(|last| last + self.interval)
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn is_open(&self, now: Instant) -> bool {
        match self.last_emit {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }
}
