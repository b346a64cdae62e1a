//! Persistence: the saved-scene blob format and the store it lives in.
//!
//! The scene is saved as a JSON array of records, front of the registry
//! first. Each record carries a `shapeType` tag and that variant's fields:
//!
//! ```json
//! [{"shapeType":"Circle","cx":200,"cy":200,"radius":25,"scale":1,"rotationDegree":0,"fill":null}]
//! ```
//!
//! `scale`, `rotationDegree` and `fill` may be absent and take their
//! defaults. Unknown keys are ignored. A record that can't be turned into a
//! shape is skipped with a warning; a blob that isn't a JSON array is
//! rejected as a whole and the caller falls back to [`default_scene`].

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_STAR_SPIKES, MIN_STAR_SPIKES};
use crate::doc::{Geometry, Shape, ShapeRegistry};
use crate::viewport::Point;

/// Error returned by scene encoding, decoding and blob storage.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The blob or a record isn't valid JSON of the expected shape.
    #[error("invalid scene json: {0}")]
    Json(#[from] serde_json::Error),
    /// The blob parsed, but its top level isn't an array.
    #[error("saved scene is not an array")]
    NotAnArray,
    /// A record carries a scale that isn't a positive number.
    #[error("invalid scale: {0}")]
    InvalidScale(f64),
    /// A record carries a dimension or point count no shape can be drawn with.
    #[error("invalid {field}: {value}")]
    InvalidGeometry { field: &'static str, value: f64 },
    /// The backing store refused a read or write.
    #[error("storage error: {0}")]
    Storage(String),
}

fn default_scale() -> f64 {
    1.0
}

/// One saved shape, as it appears in the blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shapeType", rename_all_fields = "camelCase")]
pub enum ShapeRecord {
    Rect {
        cx: f64,
        cy: f64,
        width: f64,
        height: f64,
        #[serde(default = "default_scale")]
        scale: f64,
        #[serde(default)]
        rotation_degree: f64,
        #[serde(default)]
        fill: Option<String>,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        #[serde(default = "default_scale")]
        scale: f64,
        #[serde(default)]
        rotation_degree: f64,
        #[serde(default)]
        fill: Option<String>,
    },
    Triangle {
        cx: f64,
        cy: f64,
        side: f64,
        #[serde(default = "default_scale")]
        scale: f64,
        #[serde(default)]
        rotation_degree: f64,
        #[serde(default)]
        fill: Option<String>,
    },
    Star {
        cx: f64,
        cy: f64,
        spikes: u32,
        outer_radius: f64,
        inner_radius: f64,
        #[serde(default = "default_scale")]
        scale: f64,
        #[serde(default)]
        rotation_degree: f64,
        #[serde(default)]
        fill: Option<String>,
    },
}

impl From<&Shape> for ShapeRecord {
    fn from(shape: &Shape) -> Self {
        let Point { x: cx, y: cy } = shape.center;
        let scale = shape.scale;
        let rotation_degree = shape.rotation_deg;
        let fill = shape.fill.clone();
        match shape.geometry {
            Geometry::Rect { width, height } => Self::Rect { cx, cy, width, height, scale, rotation_degree, fill },
            Geometry::Circle { radius } => Self::Circle { cx, cy, radius, scale, rotation_degree, fill },
            Geometry::Triangle { side } => Self::Triangle { cx, cy, side, scale, rotation_degree, fill },
            Geometry::Star { spikes, outer_radius, inner_radius } => {
                Self::Star { cx, cy, spikes, outer_radius, inner_radius, scale, rotation_degree, fill }
            }
        }
    }
}

impl TryFrom<ShapeRecord> for Shape {
    type Error = PersistError;

    fn try_from(record: ShapeRecord) -> Result<Self, Self::Error> {
        let (cx, cy, geometry, scale, rotation_degree, fill) = match record {
            ShapeRecord::Rect { cx, cy, width, height, scale, rotation_degree, fill } => {
                (cx, cy, Geometry::Rect { width, height }, scale, rotation_degree, fill)
            }
            ShapeRecord::Circle { cx, cy, radius, scale, rotation_degree, fill } => {
                (cx, cy, Geometry::Circle { radius }, scale, rotation_degree, fill)
            }
            ShapeRecord::Triangle { cx, cy, side, scale, rotation_degree, fill } => {
                (cx, cy, Geometry::Triangle { side }, scale, rotation_degree, fill)
            }
            ShapeRecord::Star { cx, cy, spikes, outer_radius, inner_radius, scale, rotation_degree, fill } => {
                (cx, cy, Geometry::Star { spikes, outer_radius, inner_radius }, scale, rotation_degree, fill)
            }
        };
        if !(scale.is_finite() && scale > 0.0) {
            return Err(PersistError::InvalidScale(scale));
        }
        check_geometry(&geometry)?;
        Ok(Shape::new(Point::new(cx, cy), geometry).with_transform(scale, rotation_degree, fill))
    }
}

fn check_geometry(geometry: &Geometry) -> Result<(), PersistError> {
    match *geometry {
        Geometry::Rect { width, height } => {
            check_dimension("width", width)?;
            check_dimension("height", height)
        }
        Geometry::Circle { radius } => check_dimension("radius", radius),
        Geometry::Triangle { side } => check_dimension("side", side),
        Geometry::Star { spikes, outer_radius, inner_radius } => {
            if !(MIN_STAR_SPIKES..=MAX_STAR_SPIKES).contains(&spikes) {
                return Err(PersistError::InvalidGeometry { field: "spikes", value: f64::from(spikes) });
            }
            check_dimension("outerRadius", outer_radius)?;
            check_dimension("innerRadius", inner_radius)
        }
    }
}

fn check_dimension(field: &'static str, value: f64) -> Result<(), PersistError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PersistError::InvalidGeometry { field, value })
    }
}

/// The scene shown when nothing has been saved yet, listed front to back.
#[must_use]
pub fn default_scene() -> Vec<Shape> {
    vec![
        Shape::rect(25.0, 25.0, 50.0, 50.0),
        Shape::star(100.0, 100.0, 5, 30.0, 15.0),
        Shape::triangle(150.0, 150.0, 50.0),
        Shape::circle(200.0, 200.0, 25.0),
    ]
}

/// Serialize the whole registry, front to back.
///
/// # Errors
///
/// Returns [`PersistError::Json`] if serialization fails.
pub fn encode_scene(registry: &ShapeRegistry) -> Result<String, PersistError> {
    let records: Vec<ShapeRecord> = registry.iter().map(ShapeRecord::from).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Parse a saved scene, skipping records that can't be reconstructed.
///
/// # Errors
///
/// Returns an error if `raw` isn't JSON or its top level isn't an array.
pub fn decode_scene(raw: &str) -> Result<Vec<Shape>, PersistError> {
    let serde_json::Value::Array(entries) = serde_json::from_str::<serde_json::Value>(raw)? else {
        return Err(PersistError::NotAnArray);
    };
    let mut shapes = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match decode_record(entry) {
            Ok(shape) => shapes.push(shape),
            Err(e) => log::warn!("skipping saved shape #{index}: {e}"),
        }
    }
    Ok(shapes)
}

fn decode_record(entry: serde_json::Value) -> Result<Shape, PersistError> {
    let record: ShapeRecord = serde_json::from_value(entry)?;
    Shape::try_from(record)
}

// =============================================================
// Blob storage
// =============================================================

/// A key-value store of string blobs.
pub trait BlobStore {
    /// Read the blob under `key`, or `None` if nothing is stored there.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Storage`] if the store can't be read.
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Write `value` under `key`, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Storage`] if the store rejects the write.
    fn store(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

impl BlobStore for web_sys::Storage {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        self.get_item(key)
            .map_err(|e| PersistError::Storage(format!("{e:?}")))
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.set_item(key, value)
            .map_err(|e| PersistError::Storage(format!("{e:?}")))
    }
}

/// In-memory [`BlobStore`] for hosts without `localStorage`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.blobs.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Load the saved scene under `key`, falling back to [`default_scene`] when
/// nothing is saved or the blob is unreadable.
pub fn load_scene<S: BlobStore + ?Sized>(store: &S, key: &str) -> Vec<Shape> {
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            log::info!("no saved scene under {key:?}; using default scene");
            return default_scene();
        }
        Err(e) => {
            log::warn!("failed to read saved scene: {e}; using default scene");
            return default_scene();
        }
    };
    match decode_scene(&raw) {
        Ok(shapes) => {
            log::info!("loaded {} saved shapes", shapes.len());
            log::debug!("{shapes:?}");
            shapes
        }
        Err(e) => {
            log::warn!("saved scene is malformed: {e}; using default scene");
            default_scene()
        }
    }
}

/// Save every shape in `registry` under `key`, overwriting any previous scene.
///
/// # Errors
///
/// Returns an error if encoding fails or the store rejects the write.
pub fn save_scene<S: BlobStore + ?Sized>(store: &mut S, key: &str, registry: &ShapeRegistry) -> Result<(), PersistError> {
    let raw = encode_scene(registry)?;
    store.store(key, &raw)?;
    log::info!("saved {} shapes", registry.len());
    Ok(())
}
