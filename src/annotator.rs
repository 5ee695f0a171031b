//! Wires a drawing session, its presenter and the mask registry to a canvas
//! surface.

use log::warn;

use crate::geometry::Point;
use crate::presenter::Presenter;
use crate::registry::{Mask, MaskRegistry};
use crate::session::{DrawingSession, PointerDown};
use crate::style::DrawingStyle;
use crate::surface::{CanvasSurface, MarkerHandle, SurfaceEvent};

/// Surface marker standing for one vertex of the current session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorMarker {
    pub handle: MarkerHandle,
    pub vertex_index: usize,
    pub position: Point,
}

/// Polygon annotation on one image.
///
/// Events are applied one at a time; every change to the vertices, the
/// closure state or the live pointer is pushed to the surface before the
/// call returns.
#[derive(Debug)]
pub struct Annotator<S: CanvasSurface> {
    session: DrawingSession,
    presenter: Presenter,
    registry: MaskRegistry,
    anchors: Vec<AnchorMarker>,
    surface: S,
}

impl<S: CanvasSurface> Annotator<S> {
    pub fn new(surface: S, style: DrawingStyle) -> Self {
        let mut surface = surface;
        let presenter = Presenter::new(style);
        surface.add_live_shape(presenter.current());
        Self {
            session: DrawingSession::new(),
            presenter,
            registry: MaskRegistry::new(),
            anchors: Vec::new(),
            surface,
        }
    }

    /// Start with previously committed masks already on the mask layer.
    pub fn with_masks(surface: S, style: DrawingStyle, masks: &[Mask]) -> Self {
        let mut annotator = Self::new(surface, style);
        for mask in masks {
            if let Err(e) = annotator.registry.commit(
                mask.vertices().to_vec(),
                annotator.presenter.style(),
                &mut annotator.surface,
            ) {
                warn!("could not restore mask: {e}");
            }
        }
        annotator
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn registry(&self) -> &MaskRegistry {
        &self.registry
    }

    pub fn anchors(&self) -> &[AnchorMarker] {
        &self.anchors
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut Presenter {
        &mut self.presenter
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Give up the surface and the committed masks. The in-progress session
    /// and its markers are dropped.
    pub fn into_parts(self) -> (S, Vec<Mask>) {
        (self.surface, self.registry.masks().to_vec())
    }

    /// Apply one event reported by the surface.
    pub fn dispatch(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::PointerDown => {
                let p = self.surface.pointer_position();
                self.pointer_down(p);
            }
            SurfaceEvent::PointerMove(p) => self.pointer_move(p),
            SurfaceEvent::MarkerEnter(handle) => match self.vertex_of(handle) {
                Some(index) => self.vertex_hover_enter(index),
                None => warn!("hover on stale marker {handle:?}"),
            },
            SurfaceEvent::MarkerExit(handle) => match self.vertex_of(handle) {
                Some(index) => self.vertex_hover_exit(index),
                None => warn!("hover exit from stale marker {handle:?}"),
            },
        }
    }

    pub fn pointer_move(&mut self, p: Point) {
        if self.session.pointer_move(p) {
            self.publish();
        }
    }

    pub fn vertex_hover_enter(&mut self, vertex_index: usize) {
        if !self.session.vertex_hover_enter(vertex_index) {
            return;
        }
        if let Some(anchor) = self.anchor_at(vertex_index) {
            let scale = self.presenter.style().hover_scale;
            self.surface.set_marker_scale(anchor.handle, scale);
        }
    }

    /// Leaving any marker disarms closure. The start marker, the only one
    /// hover-enter enlarges, returns to its normal size.
    pub fn vertex_hover_exit(&mut self, vertex_index: usize) {
        let was_armed = self.session.is_hover_on_start();
        self.session.vertex_hover_exit(vertex_index);
        if !was_armed {
            return;
        }
        if let Some(anchor) = self.anchor_at(0) {
            self.surface.set_marker_scale(anchor.handle, 1.0);
        }
    }

    pub fn pointer_down(&mut self, p: Point) -> PointerDown {
        let outcome = self.session.pointer_down(p);
        match outcome {
            PointerDown::Extended { index, point } => {
                let style = self.presenter.style();
                let handle = self
                    .surface
                    .add_marker(point, style.anchor_radius, style.anchor_sides);
                self.anchors.push(AnchorMarker {
                    handle,
                    vertex_index: index,
                    position: point,
                });
                self.publish();
            }
            PointerDown::Closed => {
                self.publish();
                self.retire_session();
            }
            PointerDown::Ignored => {}
        }
        outcome
    }

    fn retire_session(&mut self) {
        if let Some(vertices) = self.session.retire() {
            // A refused commit is logged by the registry; the session is
            // reset either way.
            let _ = self
                .registry
                .commit(vertices, self.presenter.style(), &mut self.surface);
        }
        for anchor in self.anchors.drain(..) {
            self.surface.remove_marker(anchor.handle);
        }
        self.publish();
    }

    fn publish(&mut self) {
        let shape = self.presenter.recompute(&self.session);
        self.surface.update_live_shape(shape);
    }

    fn vertex_of(&self, handle: MarkerHandle) -> Option<usize> {
        self.anchors
            .iter()
            .find(|a| a.handle == handle)
            .map(|a| a.vertex_index)
    }

    fn anchor_at(&self, vertex_index: usize) -> Option<AnchorMarker> {
        self.anchors.get(vertex_index).copied()
    }
}
