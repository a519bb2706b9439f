//! Dotfield renders an animated dot-grid background.
//!
//! A grid of dots and guide lines drifts at half the page scroll speed, fades in with a staggered
//! sweep after mount, follows the light/dark color scheme and tracks viewport resizes. The
//! component is host-agnostic:
//!
//! - Mount a [`DotField`] against an [`InputSource`], a [`SurfaceProvider`] and a
//!   [`FrameScheduler`]
//! - Call [`MountedDotField::tick`] on every display frame
//! - Or pump frames offline with a [`FrameDriver`] into a [`FrameSink`]
//!
//! On `wasm32` the `web` module wires all of this to a canvas element and the DOM.
#![cfg_attr(not(target_arch = "wasm32"), forbid(unsafe_code))]
#![cfg_attr(target_arch = "wasm32", deny(unsafe_code))]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod clock;
pub(crate) mod config;
pub(crate) mod encode;
pub(crate) mod input;
pub(crate) mod render;
pub(crate) mod runtime;
pub(crate) mod state;
pub(crate) mod surface;
/// Browser host.
#[cfg(target_arch = "wasm32")]
#[allow(unsafe_code)]
pub mod web;

pub use crate::foundation::core::{
    DocumentExtent, Hsla, Point, SIZE_MULT, ScrollOffset, Vec2, Viewport,
};
pub use crate::foundation::error::{DotFieldError, DotFieldResult};
pub use crate::foundation::math::{interpolate, mix, progress};

pub use crate::animation::ease::Ease;
pub use crate::animation::reveal::{LINE_ALPHA_BOOST, RevealTimeline, alpha_boost};
pub use crate::clock::{
    Clock, FrameHandle, FrameScheduler, ManualClock, MonotonicClock, QueuedScheduler,
};
pub use crate::config::RenderConfig;
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig, write_png};
pub use crate::input::script::{InputScript, ScriptAction, ScriptEntry};
pub use crate::input::scripted::ScriptedInput;
pub use crate::input::{InputEvent, InputSource, Signal, Subscription};
pub use crate::render::frame::{FrameStats, grid_count, grid_positions, render_frame};
pub use crate::render::pixels::FrameRGBA;
pub use crate::runtime::{DotField, DriveStats, FrameDriver, MountedDotField};
pub use crate::state::{AmbientSnapshot, AnimationClock, ColorMode, RenderState};
pub use crate::surface::cpu::{CpuSurface, CpuSurfaceOpts, CpuSurfaceProvider};
pub use crate::surface::recording::{CircleOp, DrawCmd, LineOp, RecordingProvider, RecordingSurface};
pub use crate::surface::{Readback, Surface, SurfaceProvider};
