use std::cell::Cell;
use std::time::Instant;

/// Monotonic high-resolution time source in milliseconds.
pub trait Clock {
    /// Current time in milliseconds. Never decreases.
    fn now_ms(&self) -> f64;
}

/// Wall-clock monotonic time measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Clock whose zero is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-advanced clock for tests and offline rendering.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Clock reading `start_ms`.
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Move time forward by `ms`. Negative steps are ignored.
    pub fn advance(&self, ms: f64) {
        if ms > 0.0 {
            self.now.set(self.now.get() + ms);
        }
    }

    /// Jump to `ms` if it is not in the past.
    pub fn set(&self, ms: f64) {
        if ms > self.now.get() {
            self.now.set(ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Handle of a scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Display-refresh scheduling primitive (`requestAnimationFrame` in a browser).
pub trait FrameScheduler {
    /// Ask for the next frame; the host calls the component's tick when it is due.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a pending request. Stale handles are ignored.
    fn cancel(&mut self, handle: FrameHandle);
}

/// Scheduler for hosts that pump frames themselves: it only remembers the pending request.
#[derive(Debug, Default)]
pub struct QueuedScheduler {
    next: u64,
    pending: Option<FrameHandle>,
}

impl QueuedScheduler {
    /// Empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// The pending request, if any.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Consume the pending request; `true` if a frame was due.
    pub fn take_due(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

impl FrameScheduler for QueuedScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending = Some(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/clock.rs"]
mod tests;
