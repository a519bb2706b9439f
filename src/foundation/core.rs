pub use kurbo::{Point, Vec2};

/// Device pixel multiplier: surfaces are rendered at twice the logical resolution.
pub const SIZE_MULT: f64 = 2.0;

/// Browser viewport dimensions in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in logical pixels.
    pub width: f64,
    /// Height in logical pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport from logical dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Backing surface size in device pixels (`SIZE_MULT` times the logical size, rounded up).
    ///
    /// Negative or non-finite dimensions collapse to zero.
    pub fn device_size(self) -> (u32, u32) {
        fn scale(v: f64) -> u32 {
            let d = (v * SIZE_MULT).ceil();
            if d.is_finite() && d > 0.0 {
                d.min(f64::from(u32::MAX)) as u32
            } else {
                0
            }
        }
        (scale(self.width), scale(self.height))
    }
}

/// Current document scroll offset in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollOffset {
    /// Horizontal scroll (`scrollX`).
    pub x: f64,
    /// Vertical scroll (`scrollY`).
    pub y: f64,
}

impl ScrollOffset {
    /// Create a scroll offset.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Parallax displacement in device pixels: the grid moves at half the scroll speed.
    pub fn parallax(self) -> Vec2 {
        Vec2::new((self.x / 2.0) * SIZE_MULT, (self.y / 2.0) * SIZE_MULT)
    }
}

/// Full scrollable document size in logical pixels.
///
/// This bounds the grid independently of the visible viewport so the pattern stays put while
/// scrolling.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DocumentExtent {
    /// Scrollable width (`scrollWidth`).
    pub width: f64,
    /// Scrollable height (`scrollHeight`).
    pub height: f64,
}

impl DocumentExtent {
    /// Create a document extent.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Extent of a document that fits exactly in the viewport.
    pub fn from_viewport(vp: Viewport) -> Self {
        Self {
            width: vp.width,
            height: vp.height,
        }
    }

    /// Grid bounds in device pixels.
    pub fn device_max(self) -> Vec2 {
        Vec2::new(self.width * SIZE_MULT, self.height * SIZE_MULT)
    }
}

/// Straight-alpha HSL color, the form drawing colors are specified in.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hsla {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation in percent `[0, 100]`.
    pub s: f64,
    /// Lightness in percent `[0, 100]`.
    pub l: f64,
    /// Alpha in `[0, 1]`.
    pub a: f64,
}

impl Hsla {
    /// A neutral gray at `lightness` percent.
    pub fn gray(lightness: f64, alpha: f64) -> Self {
        Self {
            h: 0.0,
            s: 0.0,
            l: lightness,
            a: alpha,
        }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// CSS Color 4 representation, e.g. `hsl(0 0% 30% / 0.2)`.
    pub fn to_css(self) -> String {
        format!("hsl({} {}% {}% / {})", self.h, self.s, self.l, self.a)
    }

    /// Convert to straight-alpha RGBA8. Alpha is clamped to `[0, 1]`.
    pub fn to_rgba8(self) -> [u8; 4] {
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = self.h.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        [to_u8(r1), to_u8(g1), to_u8(b1), a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
