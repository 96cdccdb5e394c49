//! Certmill Render Engine
//!
//! Rasterizes one certificate per roster entry: a template image (or a
//! deterministic placeholder layout) with the entry's name drawn centered
//! on the configured anchor point.
//!
//! ```text
//! template.png ──┐
//!                ├── Surface (reset to config.width × config.height)
//! RenderConfig ──┘         │
//!                          ├── Background (template stretched / placeholder)
//! RosterEntry ─────────────┘         │
//!                                    ├── Name overlay (centered on anchor)
//!                                    ▼
//!                             PNG Artifact
//! ```
//!
//! The engine owns a single-occupancy surface slot: only one render may be
//! in flight at a time, which keeps the shared drawing surface exclusively
//! owned by the executing call.

pub mod engine;
pub mod font;
pub mod surface;
pub mod template;

pub use engine::{Artifact, RenderEngine};
pub use template::TemplateSurface;
