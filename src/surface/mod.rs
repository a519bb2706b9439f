//! Drawing surfaces the frame renderer paints onto.
//!
//! The renderer only needs a canvas-2D-like subset: clear, fill and stroke colors, a line width,
//! straight line strokes and filled circles.

pub(crate) mod cpu;
pub(crate) mod recording;

use crate::foundation::core::{Hsla, Point};
use crate::render::pixels::FrameRGBA;

/// A 2D drawing target in device pixels.
pub trait Surface {
    /// Backing width in device pixels.
    fn width(&self) -> u32;

    /// Backing height in device pixels.
    fn height(&self) -> u32;

    /// Resize the backing store. Contents are discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Clear the whole surface.
    fn clear(&mut self);

    /// Set the color used by [`Surface::fill_circle`].
    fn set_fill(&mut self, color: Hsla);

    /// Set the color used by [`Surface::stroke_line`].
    fn set_stroke(&mut self, color: Hsla);

    /// Set the stroke width in device pixels.
    fn set_line_width(&mut self, width: f64);

    /// Stroke a straight segment with the current stroke color and width (butt caps).
    fn stroke_line(&mut self, from: Point, to: Point);

    /// Fill a circle with the current fill color.
    fn fill_circle(&mut self, center: Point, radius: f64);
}

/// Hands out drawing surfaces; the analogue of asking a canvas element for a 2D context.
pub trait SurfaceProvider {
    /// Surface type produced.
    type Surface: Surface;

    /// Acquire a surface of the given device size, or `None` if no context is available.
    fn acquire(&mut self, width: u32, height: u32) -> Option<Self::Surface>;
}

/// A surface whose pixels can be read back.
pub trait Readback: Surface {
    /// Rasterize what has been drawn since the last clear.
    fn read_pixels(&mut self) -> FrameRGBA;
}
