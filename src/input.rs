//! Input model: pointer state tracked between events and the button command surface.
//!
//! `InputState` holds the non-owning references the controller keeps into the
//! registry. They are [`ShapeId`]s rather than indices so that promoting a
//! shape to the front never leaves them pointing at the wrong entry.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::str::FromStr;

use crate::doc::{ShapeId, ShapeKind};

/// Pointer state for the interaction controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// The primary button is held.
    pub pointer_down: bool,
    /// Shape grabbed by the current press; dragged while the button is held.
    pub pressed: Option<ShapeId>,
    /// Topmost shape under the pointer.
    pub hovered: Option<ShapeId>,
    /// Target of rotate and scale commands. Survives pointer-up.
    pub selected: Option<ShapeId>,
}

impl InputState {
    /// Drop every reference.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A zero-argument command triggered from the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RotateLeft,
    RotateRight,
    ScaleUp,
    ScaleDown,
    Add(ShapeKind),
}

impl Command {
    /// Every command, in toolbar order.
    pub const ALL: [Self; 8] = [
        Self::RotateLeft,
        Self::RotateRight,
        Self::ScaleUp,
        Self::ScaleDown,
        Self::Add(ShapeKind::Rect),
        Self::Add(ShapeKind::Circle),
        Self::Add(ShapeKind::Triangle),
        Self::Add(ShapeKind::Star),
    ];

    /// Stable kebab-case name used by the host to dispatch commands.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::RotateLeft => "rotate-left",
            Self::RotateRight => "rotate-right",
            Self::ScaleUp => "scale-up",
            Self::ScaleDown => "scale-down",
            Self::Add(ShapeKind::Rect) => "add-rect",
            Self::Add(ShapeKind::Circle) => "add-circle",
            Self::Add(ShapeKind::Triangle) => "add-triangle",
            Self::Add(ShapeKind::Star) => "add-star",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a command name isn't recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command: {0}")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.name() == s)
            .ok_or_else(|| UnknownCommand(s.to_owned()))
    }
}
