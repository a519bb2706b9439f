use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::foundation::core::{Hsla, Point, SIZE_MULT};
use crate::surface::{Surface, SurfaceProvider};

/// [`Surface`] over a canvas element's 2D context.
///
/// The backing store is in device pixels; the element's CSS box is kept at the logical size so
/// the page sees a viewport-sized layer.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// The canvas element drawn into.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn sync_css_size(&self) {
        let style = self.canvas.style();
        let w = f64::from(self.canvas.width()) / SIZE_MULT;
        let h = f64::from(self.canvas.height()) / SIZE_MULT;
        let _ = style.set_property("width", &format!("{w}px"));
        let _ = style.set_property("height", &format!("{h}px"));
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.sync_css_size();
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
    }

    fn set_fill(&mut self, color: Hsla) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn set_stroke(&mut self, color: Hsla) {
        self.ctx.set_stroke_style_str(&color.to_css());
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn stroke_line(&mut self, from: Point, to: Point) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Point, radius: f64) {
        self.ctx.begin_path();
        // Negative radii throw in the browser; nothing is drawn then.
        if self
            .ctx
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }
}

/// Hands out the 2D context of one canvas element.
#[derive(Debug, Clone)]
pub struct CanvasProvider {
    canvas: HtmlCanvasElement,
}

impl CanvasProvider {
    /// Provider for `canvas`.
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }
}

impl SurfaceProvider for CanvasProvider {
    type Surface = CanvasSurface;

    fn acquire(&mut self, width: u32, height: u32) -> Option<CanvasSurface> {
        let ctx = self
            .canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        let mut surface = CanvasSurface {
            canvas: self.canvas.clone(),
            ctx,
        };
        surface.resize(width, height);
        Some(surface)
    }
}
