#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

/// A point in canvas bitmap coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Maps pointer positions from the page onto the canvas bitmap.
///
/// The canvas element may be displayed (CSS) at a different size than its
/// bitmap, so X and Y are scaled independently by `bitmap / displayed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Bitmap width in canvas pixels.
    pub bitmap_width: f64,
    /// Bitmap height in canvas pixels.
    pub bitmap_height: f64,
    /// Left edge of the displayed element, in client pixels.
    pub rect_left: f64,
    /// Top edge of the displayed element, in client pixels.
    pub rect_top: f64,
    /// Displayed width, in client pixels.
    pub rect_width: f64,
    /// Displayed height, in client pixels.
    pub rect_height: f64,
}

impl Viewport {
    /// A viewport whose element is displayed at its bitmap size at the page origin.
    #[must_use]
    pub fn unscaled(width: f64, height: f64) -> Self {
        Self {
            bitmap_width: width,
            bitmap_height: height,
            rect_left: 0.0,
            rect_top: 0.0,
            rect_width: width,
            rect_height: height,
        }
    }

    /// Horizontal bitmap pixels per client pixel. Falls back to 1 for a collapsed element.
    #[must_use]
    pub fn scale_x(&self) -> f64 {
        if self.rect_width > 0.0 { self.bitmap_width / self.rect_width } else { 1.0 }
    }

    /// Vertical bitmap pixels per client pixel. Falls back to 1 for a collapsed element.
    #[must_use]
    pub fn scale_y(&self) -> f64 {
        if self.rect_height > 0.0 { self.bitmap_height / self.rect_height } else { 1.0 }
    }

    /// Convert a client-space position (e.g. `MouseEvent.clientX/Y`) to bitmap coordinates.
    #[must_use]
    pub fn client_to_canvas(&self, client_x: f64, client_y: f64) -> Point {
        Point {
            x: (client_x - self.rect_left) * self.scale_x(),
            y: (client_y - self.rect_top) * self.scale_y(),
        }
    }
}
