//! The polygon being drawn and the transitions that shape it.
//!
//! A [`DrawingSession`] only holds state and decides what a pointer event
//! means. Side effects on the canvas (markers, live shape, masks) are applied
//! by the [`Annotator`](crate::annotator::Annotator) from the returned
//! outcome values.

use log::debug;

use crate::geometry::{self, Point};

/// Fewest vertices that can be sealed into a polygon.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Coarse phase of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Drawing,
    Closed,
}

/// What a pointer-down did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerDown {
    /// A vertex was appended at `index`.
    Extended { index: usize, point: Point },
    /// The shape was sealed; the session is waiting to be retired.
    Closed,
    /// The session is already closed.
    Ignored,
}

/// State of the shape currently being drawn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawingSession {
    vertices: Vec<Point>,
    closed: bool,
    hover_on_start: bool,
    live_pointer: Point,
}

impl DrawingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_hover_on_start(&self) -> bool {
        self.hover_on_start
    }

    pub fn live_pointer(&self) -> Point {
        self.live_pointer
    }

    pub fn phase(&self) -> Phase {
        if self.closed {
            Phase::Closed
        } else if self.vertices.is_empty() {
            Phase::Idle
        } else {
            Phase::Drawing
        }
    }

    /// Render coordinates: the vertices plus the live tail while open.
    pub fn flattened(&self) -> Vec<f32> {
        let tail = (!self.closed).then_some(self.live_pointer);
        geometry::flatten(&self.vertices, tail)
    }

    /// Track the pointer. Returns whether the live tail moved.
    pub fn pointer_move(&mut self, p: Point) -> bool {
        if self.phase() != Phase::Drawing {
            return false;
        }
        self.live_pointer = p;
        true
    }

    /// The pointer entered the marker of `vertex_index`.
    ///
    /// Only the start vertex of an open shape with enough corners arms
    /// closure; everything else is ignored. Returns whether the hover flag
    /// was raised.
    pub fn vertex_hover_enter(&mut self, vertex_index: usize) -> bool {
        if vertex_index != 0 || self.closed || self.vertices.len() < MIN_POLYGON_VERTICES {
            return false;
        }
        self.hover_on_start = true;
        debug!("closure armed on {} vertices", self.vertices.len());
        true
    }

    /// The pointer left a vertex marker. Always disarms closure.
    pub fn vertex_hover_exit(&mut self, _vertex_index: usize) {
        self.hover_on_start = false;
    }

    /// Close the shape if the start vertex is hovered, otherwise add `p`.
    pub fn pointer_down(&mut self, p: Point) -> PointerDown {
        if self.closed {
            return PointerDown::Ignored;
        }
        if self.hover_on_start && self.vertices.len() >= MIN_POLYGON_VERTICES {
            let start = self.vertices[0];
            self.vertices.push(start);
            self.closed = true;
            debug!("shape closed with {} vertices", self.vertices.len() - 1);
            return PointerDown::Closed;
        }
        let index = self.vertices.len();
        self.vertices.push(p);
        self.live_pointer = p;
        debug!("vertex {index} at ({}, {})", p.x, p.y);
        PointerDown::Extended { index, point: p }
    }

    /// Hand over the closed vertex list (including the closing vertex) and
    /// leave a fresh idle session behind. Returns `None` if not closed.
    pub fn retire(&mut self) -> Option<Vec<Point>> {
        if !self.closed {
            return None;
        }
        Some(std::mem::take(self).vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> DrawingSession {
        let mut session = DrawingSession::new();
        session.pointer_down(Point::new(0.0, 0.0));
        session.pointer_down(Point::new(10.0, 0.0));
        session.pointer_down(Point::new(10.0, 10.0));
        session
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = DrawingSession::new();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.flattened().is_empty());
    }

    #[test]
    fn test_pointer_down_extends() {
        let mut session = DrawingSession::new();
        let outcome = session.pointer_down(Point::new(5.0, 6.0));
        assert_eq!(
            outcome,
            PointerDown::Extended {
                index: 0,
                point: Point::new(5.0, 6.0)
            }
        );
        assert_eq!(session.phase(), Phase::Drawing);
        assert_eq!(session.vertices(), &[Point::new(5.0, 6.0)]);
    }

    #[test]
    fn test_pointer_move_ignored_while_idle() {
        let mut session = DrawingSession::new();
        assert!(!session.pointer_move(Point::new(3.0, 3.0)));
        assert_eq!(session.live_pointer(), Point::ORIGIN);
    }

    #[test]
    fn test_live_tail_follows_pointer() {
        let mut session = triangle();
        assert!(session.pointer_move(Point::new(4.0, 9.0)));
        assert_eq!(
            session.flattened(),
            vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 4.0, 9.0]
        );
    }

    #[test]
    fn test_hover_needs_three_vertices() {
        let mut session = DrawingSession::new();
        session.pointer_down(Point::new(0.0, 0.0));
        session.pointer_down(Point::new(1.0, 0.0));
        assert!(!session.vertex_hover_enter(0));
        assert!(!session.is_hover_on_start());
    }

    #[test]
    fn test_hover_only_on_start_vertex() {
        let mut session = triangle();
        assert!(!session.vertex_hover_enter(1));
        assert!(!session.vertex_hover_enter(7));
        assert!(session.vertex_hover_enter(0));
        assert!(session.is_hover_on_start());
    }

    #[test]
    fn test_hover_exit_is_idempotent() {
        let mut session = triangle();
        session.vertex_hover_enter(0);
        session.vertex_hover_exit(0);
        let after_first = session.clone();
        session.vertex_hover_exit(0);
        session.vertex_hover_exit(42);
        assert_eq!(session, after_first);
    }

    #[test]
    fn test_close_appends_start_vertex() {
        let mut session = triangle();
        session.vertex_hover_enter(0);
        assert_eq!(session.pointer_down(Point::new(1.0, 1.0)), PointerDown::Closed);
        assert_eq!(session.phase(), Phase::Closed);
        assert_eq!(session.vertices().len(), 4);
        assert_eq!(session.vertices()[3], session.vertices()[0]);
    }

    #[test]
    fn test_closed_session_drops_live_tail() {
        let mut session = triangle();
        session.pointer_move(Point::new(50.0, 50.0));
        session.vertex_hover_enter(0);
        session.pointer_down(Point::new(0.0, 0.0));
        assert_eq!(
            session.flattened(),
            vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 0.0]
        );
        assert!(!session.pointer_move(Point::new(99.0, 99.0)));
        assert_eq!(session.pointer_down(Point::new(3.0, 3.0)), PointerDown::Ignored);
        assert!(!session.vertex_hover_enter(0));
    }

    #[test]
    fn test_retire_resets() {
        let mut session = triangle();
        assert!(session.retire().is_none());

        session.vertex_hover_enter(0);
        session.pointer_down(Point::new(0.0, 0.0));
        let vertices = session.retire().unwrap();
        assert_eq!(vertices.len(), 4);
        assert_eq!(session, DrawingSession::new());
    }

    #[test]
    fn test_single_vertex_never_closes() {
        let mut session = DrawingSession::new();
        session.pointer_down(Point::new(5.0, 5.0));
        session.vertex_hover_enter(0);
        session.pointer_down(Point::new(5.0, 5.0));
        assert!(!session.is_closed());
        assert_eq!(session.vertices(), &[Point::new(5.0, 5.0), Point::new(5.0, 5.0)]);
    }
}
