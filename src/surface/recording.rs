use crate::foundation::core::{Hsla, Point};
use crate::surface::{Surface, SurfaceProvider};

/// A recorded surface call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCmd {
    /// Surface cleared.
    Clear,
    /// Fill color changed.
    Fill(Hsla),
    /// Stroke color changed.
    Stroke(Hsla),
    /// Line width changed.
    LineWidth(f64),
    /// Segment stroked.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
    },
    /// Circle filled.
    Circle {
        /// Center point.
        center: Point,
        /// Radius.
        radius: f64,
    },
}

/// A stroked segment with the state that was active when it was drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineOp {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
    /// Stroke color.
    pub color: Hsla,
    /// Stroke width.
    pub width: f64,
}

/// A filled circle with the fill color that was active when it was drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleOp {
    /// Center point.
    pub center: Point,
    /// Radius.
    pub radius: f64,
    /// Fill color.
    pub color: Hsla,
}

/// Surface that records calls instead of drawing. Commands accumulate since the last clear.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    cmds: Vec<DrawCmd>,
    clears: usize,
}

impl RecordingSurface {
    /// Empty recording surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cmds: Vec::new(),
            clears: 0,
        }
    }

    /// Commands recorded since the last clear (the clear itself included).
    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    /// How many times the surface was cleared.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Stroked segments with their resolved color and width.
    pub fn lines(&self) -> Vec<LineOp> {
        let mut color = Hsla::gray(0.0, 1.0);
        let mut width = 1.0;
        let mut out = Vec::new();
        for cmd in &self.cmds {
            match *cmd {
                DrawCmd::Stroke(c) => color = c,
                DrawCmd::LineWidth(w) => width = w,
                DrawCmd::Line { from, to } => out.push(LineOp {
                    from,
                    to,
                    color,
                    width,
                }),
                _ => {}
            }
        }
        out
    }

    /// Filled circles with their resolved color.
    pub fn circles(&self) -> Vec<CircleOp> {
        let mut color = Hsla::gray(0.0, 1.0);
        let mut out = Vec::new();
        for cmd in &self.cmds {
            match *cmd {
                DrawCmd::Fill(c) => color = c,
                DrawCmd::Circle { center, radius } => out.push(CircleOp {
                    center,
                    radius,
                    color,
                }),
                _ => {}
            }
        }
        out
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.cmds.clear();
    }

    fn clear(&mut self) {
        self.cmds.clear();
        self.cmds.push(DrawCmd::Clear);
        self.clears += 1;
    }

    fn set_fill(&mut self, color: Hsla) {
        self.cmds.push(DrawCmd::Fill(color));
    }

    fn set_stroke(&mut self, color: Hsla) {
        self.cmds.push(DrawCmd::Stroke(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.cmds.push(DrawCmd::LineWidth(width));
    }

    fn stroke_line(&mut self, from: Point, to: Point) {
        self.cmds.push(DrawCmd::Line { from, to });
    }

    fn fill_circle(&mut self, center: Point, radius: f64) {
        self.cmds.push(DrawCmd::Circle { center, radius });
    }
}

/// Provider of [`RecordingSurface`]s. A disabled provider models a host without a 2D context.
#[derive(Clone, Copy, Debug)]
pub struct RecordingProvider {
    available: bool,
}

impl RecordingProvider {
    /// Provider that always hands out a surface.
    pub fn new() -> Self {
        Self { available: true }
    }

    /// Provider that never hands out a surface.
    pub fn unavailable() -> Self {
        Self { available: false }
    }
}

impl Default for RecordingProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceProvider for RecordingProvider {
    type Surface = RecordingSurface;

    fn acquire(&mut self, width: u32, height: u32) -> Option<RecordingSurface> {
        self.available
            .then(|| RecordingSurface::new(width, height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/recording.rs"]
mod tests;
