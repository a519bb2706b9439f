use crate::clock::{Clock, FrameHandle, FrameScheduler, ManualClock, QueuedScheduler};
use crate::config::RenderConfig;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{DotFieldError, DotFieldResult};
use crate::input::script::InputScript;
use crate::input::scripted::ScriptedInput;
use crate::input::{InputSource, Signal, Subscription};
use crate::render::frame::{FrameStats, render_frame};
use crate::state::RenderState;
use crate::surface::{Readback, Surface, SurfaceProvider};

const SIGNALS: [Signal; 3] = [Signal::Resize, Signal::Scroll, Signal::ColorScheme];

/// The dot-field background component before mounting.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DotField {
    config: RenderConfig,
}

impl DotField {
    /// Component with a fixed configuration.
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// The configuration frames will be drawn with.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Subscribe to the ambient signals, read the initial state, acquire a surface and schedule
    /// the first frame.
    ///
    /// Returns `None` without leaving anything subscribed or scheduled when the provider has no
    /// surface to give.
    pub fn mount<I, P, F>(
        self,
        input: &mut I,
        provider: &mut P,
        scheduler: &mut F,
    ) -> Option<MountedDotField<P::Surface>>
    where
        I: InputSource + ?Sized,
        P: SurfaceProvider + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        let subs = SIGNALS.map(|s| input.subscribe(s));
        let state = RenderState::from_snapshot(input.snapshot());
        let (w, h) = state.viewport.device_size();

        let Some(surface) = provider.acquire(w, h) else {
            tracing::debug!(width = w, height = h, "no drawing surface; dot field stays idle");
            for sub in subs {
                input.unsubscribe(sub);
            }
            return None;
        };

        tracing::debug!(width = w, height = h, "dot field mounted");
        let pending = Some(scheduler.request_frame());
        Some(MountedDotField {
            config: self.config,
            state,
            surface,
            subs,
            pending,
            device: (w, h),
            frames: 0,
        })
    }
}

/// A mounted dot field owning its surface and subscriptions.
#[derive(Debug)]
pub struct MountedDotField<S> {
    config: RenderConfig,
    state: RenderState,
    surface: S,
    subs: [Subscription; 3],
    pending: Option<FrameHandle>,
    /// Device size last asked of the surface; the surface may have clamped it.
    device: (u32, u32),
    frames: u64,
}

impl<S: Surface> MountedDotField<S> {
    /// Run one frame: fold queued input events into the state, keep the surface sized to the
    /// viewport, capture the animation start on the first call, draw, and schedule the next
    /// frame.
    pub fn tick<I, C, F>(&mut self, input: &mut I, clock: &C, scheduler: &mut F) -> FrameStats
    where
        I: InputSource + ?Sized,
        C: Clock + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        self.pending = None;

        while let Some(event) = input.poll() {
            event.apply(&mut self.state);
        }
        self.state.extent = input.document_extent();

        let device = self.state.viewport.device_size();
        if device != self.device {
            tracing::debug!(
                width = device.0,
                height = device.1,
                "viewport changed; resizing surface"
            );
            self.surface.resize(device.0, device.1);
            self.device = device;
        }

        let now = clock.now_ms();
        self.state.clock.start_at(now);
        let stats = render_frame(&mut self.surface, &self.state, &self.config, now);
        self.frames += 1;

        self.pending = Some(scheduler.request_frame());
        stats
    }

    /// Cancel the pending frame, drop every subscription and hand the surface back.
    pub fn unmount<I, F>(self, input: &mut I, scheduler: &mut F) -> S
    where
        I: InputSource + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        if let Some(handle) = self.pending {
            scheduler.cancel(handle);
        }
        for sub in self.subs {
            input.unsubscribe(sub);
        }
        tracing::debug!(frames = self.frames, "dot field unmounted");
        self.surface
    }

    /// Current render state.
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// The drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The drawing surface, mutably (e.g. for pixel readback).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Handle of the frame scheduled next, if any.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Frames drawn so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

/// Summary of an offline run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriveStats {
    /// Frames pushed to the sink.
    pub frames: u64,
    /// Stats of the last frame drawn.
    pub last: FrameStats,
}

/// Pumps frames at a fixed rate on simulated time, replaying an [`InputScript`].
#[derive(Debug)]
pub struct FrameDriver {
    fps: u32,
    clock: ManualClock,
    scheduler: QueuedScheduler,
    ticks: u64,
}

impl FrameDriver {
    /// Driver stepping `1000 / fps` milliseconds per frame.
    pub fn new(fps: u32) -> DotFieldResult<Self> {
        if fps == 0 {
            return Err(DotFieldError::validation("fps must be > 0"));
        }
        Ok(Self {
            fps,
            clock: ManualClock::new(0.0),
            scheduler: QueuedScheduler::new(),
            ticks: 0,
        })
    }

    /// Milliseconds between frames.
    pub fn frame_ms(&self) -> f64 {
        1000.0 / f64::from(self.fps)
    }

    /// The simulated clock.
    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Mount `field` against this driver's scheduler.
    pub fn mount<P>(
        &mut self,
        field: DotField,
        input: &mut ScriptedInput,
        provider: &mut P,
    ) -> Option<MountedDotField<P::Surface>>
    where
        P: SurfaceProvider + ?Sized,
    {
        field.mount(input, provider, &mut self.scheduler)
    }

    /// Render up to `frames` frames into `sink`, stopping early if no frame is pending.
    ///
    /// Frames are indexed from zero within each call; simulated time continues across calls.
    #[tracing::instrument(skip_all, fields(fps = self.fps, frames = frames))]
    pub fn run<S, K>(
        &mut self,
        mounted: &mut MountedDotField<S>,
        input: &mut ScriptedInput,
        script: &mut InputScript,
        frames: u64,
        sink: &mut K,
    ) -> DotFieldResult<DriveStats>
    where
        S: Readback,
        K: FrameSink + ?Sized,
    {
        sink.begin(SinkConfig {
            width: mounted.surface().width(),
            height: mounted.surface().height(),
            fps: self.fps,
        })?;

        let mut out = DriveStats::default();
        for i in 0..frames {
            if !self.scheduler.take_due() {
                tracing::debug!(frame = i, "no frame pending; stopping");
                break;
            }
            // Script times and the clock share one origin: the driver's first frame.
            let elapsed = self.ticks as f64 * self.frame_ms();
            self.clock.set(elapsed);
            script.apply_due(elapsed, input);
            self.ticks += 1;

            out.last = mounted.tick(input, &self.clock, &mut self.scheduler);
            let frame = mounted.surface_mut().read_pixels();
            sink.push_frame(i, &frame)?;
            out.frames += 1;
        }

        sink.end()?;
        tracing::debug!(frames = out.frames, "offline run finished");
        Ok(out)
    }

    /// Tear down a mount made by this driver.
    pub fn unmount<S: Surface>(
        &mut self,
        mounted: MountedDotField<S>,
        input: &mut ScriptedInput,
    ) -> S {
        mounted.unmount(input, &mut self.scheduler)
    }
}

#[cfg(test)]
#[path = "../tests/unit/runtime.rs"]
mod tests;
