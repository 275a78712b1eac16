use std::fmt::Write as _;

use crate::foundation::error::{LayerSvgError, LayerSvgResult};

pub use kurbo::{Affine, BezPath, PathEl, Point, Rect, Shape, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> LayerSvgResult<Self> {
        if width == 0 || height == 0 {
            return Err(LayerSvgError::validation(
                "canvas width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Straight (non-premultiplied) RGBA8 color.
///
/// Serialized as a `[r, g, b, a]` array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb`; alpha is carried separately as an opacity attribute.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn alpha(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Fixed-precision number formatting for emitted attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumFmt {
    precision: u8,
}

impl Default for NumFmt {
    fn default() -> Self {
        Self { precision: 3 }
    }
}

impl NumFmt {
    pub fn new(precision: u8) -> Self {
        Self {
            precision: precision.min(9),
        }
    }

    /// Round to the configured precision and drop trailing zeros (`2.500` -> `2.5`).
    pub fn num(self, v: f64) -> String {
        if !v.is_finite() {
            return "0".to_string();
        }
        let mut s = format!("{:.*}", usize::from(self.precision), v);
        if s.contains('.') {
            while s.ends_with('0') {
                s.pop();
            }
            if s.ends_with('.') {
                s.pop();
            }
        }
        if s == "-0" {
            s = "0".to_string();
        }
        s
    }

    /// SVG path data for `path`, using absolute commands only.
    pub fn path_data(self, path: &BezPath) -> String {
        let mut d = String::new();
        for el in path.elements() {
            if !d.is_empty() {
                d.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match *el {
                PathEl::MoveTo(p) => write!(d, "M{} {}", self.num(p.x), self.num(p.y)),
                PathEl::LineTo(p) => write!(d, "L{} {}", self.num(p.x), self.num(p.y)),
                PathEl::QuadTo(a, p) => write!(
                    d,
                    "Q{} {} {} {}",
                    self.num(a.x),
                    self.num(a.y),
                    self.num(p.x),
                    self.num(p.y)
                ),
                PathEl::CurveTo(a, b, p) => write!(
                    d,
                    "C{} {} {} {} {} {}",
                    self.num(a.x),
                    self.num(a.y),
                    self.num(b.x),
                    self.num(b.y),
                    self.num(p.x),
                    self.num(p.y)
                ),
                PathEl::ClosePath => write!(d, "Z"),
            };
        }
        d
    }

    /// `matrix(a b c d e f)` for a non-identity transform.
    pub fn matrix(self, t: Affine) -> Option<String> {
        if t == Affine::IDENTITY {
            return None;
        }
        let c = t.as_coeffs();
        Some(format!(
            "matrix({} {} {} {} {} {})",
            self.num(c[0]),
            self.num(c[1]),
            self.num(c[2]),
            self.num(c[3]),
            self.num(c[4]),
            self.num(c[5])
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
