//! Sketch configuration supplied by the host page.
//!
//! Every field has a default, so the host may pass `{}` or only the keys it
//! wants to change. Keys are camelCase to match the JavaScript side.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::doc::ShapeKind;
use crate::input::Command;

pub const DEFAULT_CANVAS_WIDTH: u32 = 1024;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 768;
pub const DEFAULT_STORAGE_KEY: &str = "shapesArray";

/// Canvas size, storage key and toolbar wiring.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SketchConfig {
    /// Canvas bitmap width in pixels.
    pub width: u32,
    /// Canvas bitmap height in pixels.
    pub height: u32,
    /// `localStorage` key holding the saved scene.
    pub storage_key: String,
    /// Element ids of the toolbar buttons.
    pub buttons: ButtonIds,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            buttons: ButtonIds::default(),
        }
    }
}

impl SketchConfig {
    /// Parse a JSON config, filling absent keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `raw` isn't a JSON object of the expected shape.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Element ids for each toolbar command. An empty id leaves that command unbound.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonIds {
    pub rotate_left: String,
    pub rotate_right: String,
    pub scale_up: String,
    pub scale_down: String,
    pub add_rect: String,
    pub add_circle: String,
    pub add_triangle: String,
    pub add_star: String,
}

impl Default for ButtonIds {
    fn default() -> Self {
        Self {
            rotate_left: "rot-left-button".into(),
            rotate_right: "rot-right-button".into(),
            scale_up: "scale-up-button".into(),
            scale_down: "scale-down-button".into(),
            add_rect: "add-rect".into(),
            add_circle: "add-circle".into(),
            add_triangle: "add-triangle".into(),
            add_star: "add-star".into(),
        }
    }
}

impl ButtonIds {
    /// Pairs of `(element id, command)` for every bound button.
    #[must_use]
    pub fn bindings(&self) -> Vec<(&str, Command)> {
        [
            (self.rotate_left.as_str(), Command::RotateLeft),
            (self.rotate_right.as_str(), Command::RotateRight),
            (self.scale_up.as_str(), Command::ScaleUp),
            (self.scale_down.as_str(), Command::ScaleDown),
            (self.add_rect.as_str(), Command::Add(ShapeKind::Rect)),
            (self.add_circle.as_str(), Command::Add(ShapeKind::Circle)),
            (self.add_triangle.as_str(), Command::Add(ShapeKind::Triangle)),
            (self.add_star.as_str(), Command::Add(ShapeKind::Star)),
        ]
        .into_iter()
        .filter(|(id, _)| !id.is_empty())
        .collect()
    }
}
