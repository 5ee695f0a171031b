//! [`CanvasSurface`] backed by an egui painter.
//!
//! Surface coordinates are image pixels. The view supplies an
//! [`ImageTransform`] each frame so pointer positions can be mapped into
//! image space and shapes back onto the screen.

use std::collections::BTreeMap;

use eframe::egui;

use crate::geometry::{self, Point};
use crate::style::{Color4, DrawingStyle};
use crate::surface::{CanvasSurface, MarkerHandle, ShapeDescription, SurfaceEvent};

/// Maps image pixels onto the screen rectangle the image is drawn in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageTransform {
    pub origin: egui::Pos2,
    /// Screen points per image pixel.
    pub scale: f32,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self {
            origin: egui::Pos2::ZERO,
            scale: 1.0,
        }
    }
}

impl ImageTransform {
    pub fn to_screen(&self, p: Point) -> egui::Pos2 {
        self.origin + egui::vec2(p.x, p.y) * self.scale
    }

    pub fn to_image(&self, pos: egui::Pos2) -> Point {
        let rel = (pos - self.origin) / self.scale;
        Point::new(rel.x, rel.y)
    }
}

#[derive(Clone, Debug)]
struct Marker {
    center: Point,
    radius: f32,
    side_count: usize,
    scale: f32,
    hovered: bool,
}

#[derive(Clone, Debug)]
pub struct EguiSurface {
    live: Option<ShapeDescription>,
    masks: Vec<ShapeDescription>,
    markers: BTreeMap<MarkerHandle, Marker>,
    pointer: Point,
    transform: ImageTransform,
    next_marker: u64,
    hover_stale: bool,
    anchor_fill: Color4,
    anchor_stroke: Color4,
    anchor_stroke_width: f32,
}

impl EguiSurface {
    pub fn new(style: &DrawingStyle) -> Self {
        Self {
            live: None,
            masks: Vec::new(),
            markers: BTreeMap::new(),
            pointer: Point::ORIGIN,
            transform: ImageTransform::default(),
            next_marker: 0,
            hover_stale: false,
            anchor_fill: style.anchor_fill,
            anchor_stroke: style.anchor_stroke,
            anchor_stroke_width: style.anchor_stroke_width,
        }
    }

    pub fn set_transform(&mut self, transform: ImageTransform) {
        self.transform = transform;
    }

    pub fn transform(&self) -> ImageTransform {
        self.transform
    }

    /// A marker shrank under a pointer that may still be on it. The next
    /// [`track_pointer`](Self::track_pointer) must run even if the pointer has
    /// not moved.
    pub fn needs_hover_refresh(&self) -> bool {
        self.hover_stale
    }

    pub fn marker_scale(&self, marker: MarkerHandle) -> Option<f32> {
        self.markers.get(&marker).map(|m| m.scale)
    }

    /// Record a new pointer position and report the marker hover changes it
    /// causes, exits before enters, followed by the move itself.
    ///
    /// Markers are hit within their drawn radius in screen points.
    pub fn track_pointer(&mut self, p: Point) -> Vec<SurfaceEvent> {
        self.pointer = p;
        self.hover_stale = false;
        let mut exits = Vec::new();
        let mut enters = Vec::new();
        for (handle, marker) in &mut self.markers {
            let inside = marker.center.distance_to(p) * self.transform.scale <= marker.radius * marker.scale;
            if inside == marker.hovered {
                continue;
            }
            marker.hovered = inside;
            if inside {
                enters.push(SurfaceEvent::MarkerEnter(*handle));
            } else {
                exits.push(SurfaceEvent::MarkerExit(*handle));
            }
        }
        exits.extend(enters);
        exits.push(SurfaceEvent::PointerMove(p));
        exits
    }

    /// The pointer left the canvas: every hovered marker is exited.
    pub fn pointer_left(&mut self) -> Vec<SurfaceEvent> {
        self.markers
            .iter_mut()
            .filter(|(_, m)| m.hovered)
            .map(|(handle, m)| {
                m.hovered = false;
                SurfaceEvent::MarkerExit(*handle)
            })
            .collect()
    }

    pub fn paint(&self, painter: &egui::Painter) {
        for mask in &self.masks {
            self.paint_shape(painter, mask);
        }
        if let Some(live) = &self.live {
            self.paint_shape(painter, live);
        }
        for marker in self.markers.values() {
            self.paint_marker(painter, marker);
        }
    }

    fn paint_shape(&self, painter: &egui::Painter, shape: &ShapeDescription) {
        let mut vertices: Vec<Point> = shape.vertices().collect();
        if shape.closed && vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 2 {
            return;
        }
        let screen: Vec<egui::Pos2> = vertices.iter().map(|p| self.transform.to_screen(*p)).collect();
        let stroke = egui::Stroke::new(shape.stroke_width, shape.stroke.to_egui());

        if !shape.closed {
            painter.add(egui::Shape::line(screen, stroke));
            return;
        }
        if let Some(fill) = shape.fill {
            let color = fill.to_egui();
            let mut mesh = egui::Mesh::default();
            for pos in &screen {
                mesh.colored_vertex(*pos, color);
            }
            for [a, b, c] in geometry::triangulate(&vertices) {
                mesh.add_triangle(a as u32, b as u32, c as u32);
            }
            painter.add(egui::Shape::Mesh(mesh.into()));
        }
        painter.add(egui::Shape::closed_line(screen, stroke));
    }

    fn paint_marker(&self, painter: &egui::Painter, marker: &Marker) {
        let radius = marker.radius * marker.scale;
        let center = self.transform.to_screen(marker.center);
        let corner = center - egui::vec2(radius, radius);
        let points = geometry::regular_polygon_vertices(marker.side_count, radius)
            .into_iter()
            .map(|p| corner + egui::vec2(p.x, p.y))
            .collect();
        painter.add(egui::Shape::convex_polygon(
            points,
            self.anchor_fill.to_egui(),
            egui::Stroke::new(self.anchor_stroke_width, self.anchor_stroke.to_egui()),
        ));
    }
}

impl CanvasSurface for EguiSurface {
    fn add_live_shape(&mut self, shape: &ShapeDescription) {
        self.live = Some(shape.clone());
    }

    fn update_live_shape(&mut self, shape: &ShapeDescription) {
        self.live = Some(shape.clone());
    }

    fn add_persistent_shape(&mut self, shape: &ShapeDescription) {
        self.masks.push(shape.clone());
    }

    fn add_marker(&mut self, position: Point, radius: f32, side_count: usize) -> MarkerHandle {
        let handle = MarkerHandle(self.next_marker);
        self.next_marker += 1;
        self.markers.insert(
            handle,
            Marker {
                center: position,
                radius,
                side_count,
                scale: 1.0,
                hovered: false,
            },
        );
        handle
    }

    fn set_marker_scale(&mut self, marker: MarkerHandle, scale: f32) {
        if let Some(m) = self.markers.get_mut(&marker) {
            // Shrinking drops the hover so a pointer still inside re-enters.
            if scale < m.scale && m.hovered {
                m.hovered = false;
                self.hover_stale = true;
            }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_round_trip() {
        let t = ImageTransform {
            origin: egui::pos2(100.0, 50.0),
            scale: 0.5,
        };
        let screen = t.to_screen(Point::new(40.0, 20.0));
        assert_eq!(screen, egui::pos2(120.0, 60.0));
        assert_eq!(t.to_image(screen), Point::new(40.0, 20.0));
    }

    #[test]
    fn test_marker_hover_events() {
        let mut surface = EguiSurface::new(&DrawingStyle::default());
        let handle = surface.add_marker(Point::new(10.0, 10.0), 6.0, 6);

        let events = surface.track_pointer(Point::new(12.0, 11.0));
        assert_eq!(
            events,
            vec![
                SurfaceEvent::MarkerEnter(handle),
                SurfaceEvent::PointerMove(Point::new(12.0, 11.0))
            ]
        );
        assert_eq!(surface.pointer_position(), Point::new(12.0, 11.0));

        // Still inside: no new hover event
        let events = surface.track_pointer(Point::new(11.0, 11.0));
        assert_eq!(events, vec![SurfaceEvent::PointerMove(Point::new(11.0, 11.0))]);

        let events = surface.track_pointer(Point::new(40.0, 40.0));
        assert_eq!(events[0], SurfaceEvent::MarkerExit(handle));
    }

    #[test]
    fn test_hit_radius_is_in_screen_points() {
        let mut surface = EguiSurface::new(&DrawingStyle::default());
        let handle = surface.add_marker(Point::new(100.0, 100.0), 6.0, 6);
        surface.set_transform(ImageTransform {
            origin: egui::Pos2::ZERO,
            scale: 0.25,
        });
        // 20 image pixels away is 5 screen points: inside the 6 point radius
        let events = surface.track_pointer(Point::new(120.0, 100.0));
        assert_eq!(events[0], SurfaceEvent::MarkerEnter(handle));

        // Enlarged marker keeps the hover over a wider area
        surface.set_marker_scale(handle, 2.0);
        assert!(!surface.needs_hover_refresh());
        let events = surface.track_pointer(Point::new(140.0, 100.0));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_shrunk_marker_under_pointer_enters_again() {
        let mut surface = EguiSurface::new(&DrawingStyle::default());
        let handle = surface.add_marker(Point::new(0.0, 0.0), 6.0, 6);
        surface.track_pointer(Point::new(1.0, 0.0));
        surface.set_marker_scale(handle, 2.0);
        surface.track_pointer(Point::new(4.0, 0.0));

        surface.set_marker_scale(handle, 1.0);
        assert!(surface.needs_hover_refresh());
        assert_eq!(surface.marker_scale(handle), Some(1.0));

        let events = surface.track_pointer(Point::new(4.0, 0.0));
        assert_eq!(events[0], SurfaceEvent::MarkerEnter(handle));
        assert!(!surface.needs_hover_refresh());
    }

    #[test]
    fn test_shrunk_marker_away_from_pointer_stays_quiet() {
        let mut surface = EguiSurface::new(&DrawingStyle::default());
        let handle = surface.add_marker(Point::new(0.0, 0.0), 6.0, 6);
        surface.track_pointer(Point::new(1.0, 0.0));
        surface.set_marker_scale(handle, 2.0);
        surface.track_pointer(Point::new(10.0, 0.0));

        surface.set_marker_scale(handle, 1.0);
        let events = surface.track_pointer(Point::new(30.0, 0.0));
        assert_eq!(events, vec![SurfaceEvent::PointerMove(Point::new(30.0, 0.0))]);
    }

    #[test]
    fn test_pointer_left_exits_hovered_markers() {
        let mut surface = EguiSurface::new(&DrawingStyle::default());
        let a = surface.add_marker(Point::new(0.0, 0.0), 6.0, 6);
        surface.add_marker(Point::new(100.0, 0.0), 6.0, 6);
        surface.track_pointer(Point::new(1.0, 1.0));

        assert_eq!(surface.pointer_left(), vec![SurfaceEvent::MarkerExit(a)]);
        assert!(surface.pointer_left().is_empty());
    }

    #[test]
    fn test_removed_marker_produces_no_events() {
        let mut surface = EguiSurface::new(&DrawingStyle::default());
        let a = surface.add_marker(Point::new(0.0, 0.0), 6.0, 6);
        surface.remove_marker(a);
        assert_eq!(surface.track_pointer(Point::ORIGIN).len(), 1);
    }
}
