//! Shared numeric constants for the sketch crate.

// ── Commands ────────────────────────────────────────────────────

/// Degrees added or removed by one rotate command.
pub const ROTATE_STEP_DEG: f64 = 15.0;

/// Scale delta applied by one scale command.
pub const SCALE_STEP: f64 = 0.1;

// ── Highlight ───────────────────────────────────────────────────

/// Global alpha applied while the pointer hovers a shape.
pub const HOVER_ALPHA: f64 = 0.65;

/// Outline width for the selected shape, in canvas pixels.
pub const SELECTED_LINE_WIDTH: f64 = 15.0;

/// Outline color for the selected shape.
pub const SELECTED_STROKE: &str = "red";

// ── Default geometry ────────────────────────────────────────────

/// Width of a newly added rectangle, in canvas pixels.
pub const DEFAULT_RECT_WIDTH: f64 = 50.0;

/// Height of a newly added rectangle, in canvas pixels.
pub const DEFAULT_RECT_HEIGHT: f64 = 50.0;

/// Radius of a newly added circle, in canvas pixels.
pub const DEFAULT_CIRCLE_RADIUS: f64 = 25.0;

/// Side length of a newly added triangle, in canvas pixels.
pub const DEFAULT_TRIANGLE_SIDE: f64 = 50.0;

/// Point count of a newly added star.
pub const DEFAULT_STAR_SPIKES: u32 = 5;

/// Tip radius of a newly added star, in canvas pixels.
pub const DEFAULT_STAR_OUTER_RADIUS: f64 = 30.0;

/// Notch radius of a newly added star, in canvas pixels.
pub const DEFAULT_STAR_INNER_RADIUS: f64 = 15.0;

// ── Saved scenes ────────────────────────────────────────────────

/// Fewest points a saved star may have.
pub const MIN_STAR_SPIKES: u32 = 2;

/// Most points a saved star may have.
pub const MAX_STAR_SPIKES: u32 = 64;

// ── Hit-testing ─────────────────────────────────────────────────

/// Curve flattening tolerance used when arcs are recorded for hit testing.
pub const ARC_TOLERANCE: f64 = 0.05;
