//! Interactive shape sketch on a single HTML canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It keeps a
//! z-ordered list of rectangles, circles, triangles and stars, lets the user
//! hover, select, drag, rotate and scale them with the mouse and a toolbar,
//! repaints the whole scene every animation frame, and saves the scene to
//! `localStorage` when the page unloads. JavaScript only has to call
//! [`host::mount`] with a canvas id.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Shape model and the z-ordered [`doc::ShapeRegistry`] |
//! | [`path`] | Shape outlines traced through the [`path::PathSink`] seam |
//! | [`hit`] | Point-in-shape tests and topmost-shape lookup |
//! | [`input`] | Pointer state and toolbar commands |
//! | [`viewport`] | Client-to-bitmap coordinate mapping |
//! | [`render`] | Canvas2D painting with hover and selection highlights |
//! | [`persist`] | Scene JSON format and blob storage |
//! | [`config`] | Mount-time settings (canvas size, storage key, button ids) |
//! | [`host`] | DOM wiring, frame loop and the `wasm_bindgen` surface |
//! | [`consts`] | Shared numeric constants (step sizes, default dimensions) |

pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod host;
pub mod input;
pub mod path;
pub mod persist;
pub mod render;
pub mod viewport;
