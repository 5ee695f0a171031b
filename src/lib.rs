//! Polygon mask annotation for raster images.
//!
//! The core is a small state machine: pointer clicks place vertices, hovering
//! the first vertex arms closure, and the next click seals the polygon into a
//! [`registry::Mask`]. Rendering is delegated to a [`surface::CanvasSurface`];
//! [`egui_surface::EguiSurface`] draws with egui and
//! [`surface::RecordingSurface`] keeps a headless display list.

pub mod annotator;
pub mod app;
pub mod catalog;
pub mod config;
pub mod egui_surface;
pub mod error;
pub mod geometry;
pub mod presenter;
pub mod registry;
pub mod route;
pub mod session;
pub mod style;
pub mod surface;

pub use annotator::{AnchorMarker, Annotator};
pub use error::{PolymaskError, Result};
pub use geometry::Point;
pub use registry::{Mask, MaskId, MaskRegistry};
pub use session::{DrawingSession, Phase, PointerDown};
pub use surface::{CanvasSurface, MarkerHandle, RecordingSurface, ShapeDescription, SurfaceEvent};
