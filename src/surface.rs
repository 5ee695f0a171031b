//! The canvas a drawing session renders onto.
//!
//! The core never draws pixels itself. It pushes [`ShapeDescription`]s and
//! anchor markers to a [`CanvasSurface`] and receives pointer and marker
//! hover notifications back as [`SurfaceEvent`]s.

use std::collections::BTreeMap;

use crate::geometry::Point;
use crate::style::Color4;

/// Everything a surface needs to draw one polygon or polyline.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeDescription {
    /// Interleaved `x, y` coordinates.
    pub points: Vec<f32>,
    pub closed: bool,
    pub fill: Option<Color4>,
    pub stroke: Color4,
    pub stroke_width: f32,
}

impl ShapeDescription {
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.chunks_exact(2).map(|xy| Point::new(xy[0], xy[1]))
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Opaque reference to a marker created by [`CanvasSurface::add_marker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerHandle(pub u64);

/// Input reported by a surface, in surface-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceEvent {
    /// Primary button pressed at [`CanvasSurface::pointer_position`].
    PointerDown,
    PointerMove(Point),
    MarkerEnter(MarkerHandle),
    MarkerExit(MarkerHandle),
}

/// Rendering backend for the annotation core.
pub trait CanvasSurface {
    /// Install the live (in-progress) shape.
    fn add_live_shape(&mut self, shape: &ShapeDescription);

    /// Replace the live shape with a newer description.
    fn update_live_shape(&mut self, shape: &ShapeDescription);

    /// Draw a committed mask. Never updated afterward.
    fn add_persistent_shape(&mut self, shape: &ShapeDescription);

    /// Place an anchor marker centered on `position`. The surface reports
    /// pointer enter/exit on it as marker events carrying the handle.
    fn add_marker(&mut self, position: Point, radius: f32, side_count: usize) -> MarkerHandle;

    fn set_marker_scale(&mut self, marker: MarkerHandle, scale: f32);

    fn remove_marker(&mut self, marker: MarkerHandle);

    /// Pointer location in surface-local (image) coordinates.
    fn pointer_position(&self) -> Point;
}

// ── Headless surface ────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedMarker {
    pub position: Point,
    pub radius: f32,
    pub side_count: usize,
    pub scale: f32,
}

/// A surface that only remembers its display list.
///
/// Useful for driving an annotator without a window, e.g. in tests or batch
/// tools.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub live: Option<ShapeDescription>,
    /// Number of live-shape pushes received, install included.
    pub live_updates: usize,
    pub persistent: Vec<ShapeDescription>,
    pub markers: BTreeMap<MarkerHandle, RecordedMarker>,
    pub pointer: Point,
    next_marker: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<&RecordedMarker> {
        self.markers.get(&handle)
    }
}

impl CanvasSurface for RecordingSurface {
    fn add_live_shape(&mut self, shape: &ShapeDescription) {
        self.live = Some(shape.clone());
        self.live_updates += 1;
    }

    fn update_live_shape(&mut self, shape: &ShapeDescription) {
        self.live = Some(shape.clone());
        self.live_updates += 1;
    }

    fn add_persistent_shape(&mut self, shape: &ShapeDescription) {
        self.persistent.push(shape.clone());
    }

    fn add_marker(&mut self, position: Point, radius: f32, side_count: usize) -> MarkerHandle {
        let handle = MarkerHandle(self.next_marker);
        self.next_marker += 1;
        self.markers.insert(
            handle,
            RecordedMarker {
                position,
                radius,
                side_count,
                scale: 1.0,
            },
        );
        handle
    }

    fn set_marker_scale(&mut self, marker: MarkerHandle, scale: f32) {
        if let Some(m) = self.markers.get_mut(&marker) {
            m.scale = scale;
        }
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        self.markers.remove(&marker);
    }

    fn pointer_position(&self) -> Point {
        self.pointer
    }
}
