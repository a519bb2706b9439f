use vello_cpu::kurbo::Shape as _;

use crate::foundation::core::{Hsla, Point, Vec2};
use crate::render::pixels::FrameRGBA;
use crate::surface::{Readback, Surface, SurfaceProvider};

/// Options for [`CpuSurface`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuSurfaceOpts {
    pub(crate) clear_rgba: Option<[u8; 4]>,
}

impl CpuSurfaceOpts {
    /// Return options with a straight-alpha background painted on every clear.
    ///
    /// `None` leaves the surface transparent, like a canvas element.
    pub fn with_clear_rgba(mut self, clear: Option<[u8; 4]>) -> Self {
        self.clear_rgba = clear;
        self
    }
}

/// Software surface rasterized with `vello_cpu`.
///
/// Draw calls are recorded into a `vello_cpu::RenderContext` and rasterized on
/// [`CpuSurface::snapshot`].
pub struct CpuSurface {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    opts: CpuSurfaceOpts,
    fill: [u8; 4],
    stroke: [u8; 4],
    line_width: f64,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

impl CpuSurface {
    /// Create a surface, or `None` when the size is zero or exceeds the rasterizer's limit.
    pub fn new(width: u32, height: u32, opts: CpuSurfaceOpts) -> Option<Self> {
        let (w, h) = raster_size(width, height)?;
        Some(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            width: w,
            height: h,
            opts,
            fill: [0, 0, 0, 255],
            stroke: [0, 0, 0, 255],
            line_width: 1.0,
        })
    }

    /// Rasterize everything drawn since the last clear.
    pub fn snapshot(&mut self) -> FrameRGBA {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn paint(&mut self, rgba: [u8; 4]) {
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]));
    }
}

impl Surface for CpuSurface {
    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        let w = width.clamp(1, u32::from(u16::MAX)) as u16;
        let h = height.clamp(1, u32::from(u16::MAX)) as u16;
        if w == self.width && h == self.height {
            return;
        }
        tracing::debug!(width = w, height = h, "resizing cpu surface");
        self.ctx = vello_cpu::RenderContext::new(w, h);
        self.width = w;
        self.height = h;
    }

    fn clear(&mut self) {
        self.ctx.reset();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        if let Some(bg) = self.opts.clear_rgba {
            self.paint(bg);
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
    }

    fn set_fill(&mut self, color: Hsla) {
        self.fill = color.to_rgba8();
    }

    fn set_stroke(&mut self, color: Hsla) {
        self.stroke = color.to_rgba8();
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn stroke_line(&mut self, from: Point, to: Point) {
        let Some(path) = segment_quad(from, to, self.line_width) else {
            return;
        };
        self.paint(self.stroke);
        self.ctx.fill_path(&path);
    }

    fn fill_circle(&mut self, center: Point, radius: f64) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        let circle = vello_cpu::kurbo::Circle::new((center.x, center.y), radius);
        self.paint(self.fill);
        self.ctx.fill_path(&circle.to_path(0.1));
    }
}

impl Readback for CpuSurface {
    fn read_pixels(&mut self) -> FrameRGBA {
        self.snapshot()
    }
}

/// Hands out [`CpuSurface`]s; refuses sizes the rasterizer cannot hold.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuSurfaceProvider {
    opts: CpuSurfaceOpts,
}

impl CpuSurfaceProvider {
    /// Provider creating surfaces with `opts`.
    pub fn new(opts: CpuSurfaceOpts) -> Self {
        Self { opts }
    }
}

impl SurfaceProvider for CpuSurfaceProvider {
    type Surface = CpuSurface;

    fn acquire(&mut self, width: u32, height: u32) -> Option<CpuSurface> {
        CpuSurface::new(width, height, self.opts)
    }
}

fn raster_size(width: u32, height: u32) -> Option<(u16, u16)> {
    let w = u16::try_from(width).ok().filter(|&w| w > 0)?;
    let h = u16::try_from(height).ok().filter(|&h| h > 0)?;
    Some((w, h))
}

/// Outline of a butt-capped stroke as a filled quad.
fn segment_quad(from: Point, to: Point, width: f64) -> Option<vello_cpu::kurbo::BezPath> {
    let d = to - from;
    let len = d.hypot();
    if len.is_nan() || len <= 0.0 || width.is_nan() || width <= 0.0 {
        return None;
    }
    let n = Vec2::new(-d.y, d.x) * (width / 2.0 / len);
    let corners = [from + n, to + n, to - n, from - n];

    let mut path = vello_cpu::kurbo::BezPath::new();
    path.move_to((corners[0].x, corners[0].y));
    for c in &corners[1..] {
        path.line_to((c.x, c.y));
    }
    path.close_path();
    Some(path)
}

#[cfg(test)]
#[path = "../../tests/unit/surface/cpu.rs"]
mod tests;
