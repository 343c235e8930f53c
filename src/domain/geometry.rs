//! Pixel-space geometry reported by the rendering harness

use serde::{Deserialize, Serialize};

/// Pixel rectangle enclosing a rendered page's visible content
///
/// Recomputed on every render call; layout differs per page and per scale, so
/// a box is never reused for another page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rejects boxes the capture step cannot use
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(format!("bounding box {name} is not finite: {value}"));
            }
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(format!(
                "bounding box has negative size: {}x{}",
                self.width, self.height
            ));
        }
        Ok(())
    }

    /// Viewport that fully contains this box
    pub fn viewport(&self) -> Viewport {
        Viewport::from(self)
    }
}

/// Tab viewport size in CSS pixels, always at device scale 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl From<&BoundingBox> for Viewport {
    /// `(ceil(x + width), ceil(y + height))`
    fn from(bounds: &BoundingBox) -> Self {
        Self {
            width: ceil_px(bounds.x + bounds.width),
            height: ceil_px(bounds.y + bounds.height),
        }
    }
}

fn ceil_px(value: f64) -> u32 {
    // `as` saturates, negatives land on 0
    value.ceil().max(0.0) as u32
}
