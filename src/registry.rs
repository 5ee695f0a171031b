//! Committed masks.

use log::{error, info};

use crate::error::{PolymaskError, Result};
use crate::geometry::{self, Point};
use crate::session::MIN_POLYGON_VERTICES;
use crate::style::DrawingStyle;
use crate::surface::{CanvasSurface, ShapeDescription};

/// Position of a mask in its registry, in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaskId(pub usize);

/// A sealed polygon. The last vertex repeats the first.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    vertices: Vec<Point>,
}

impl Mask {
    /// Build a mask from a closed vertex list. A missing closing vertex is
    /// appended.
    pub fn new(mut vertices: Vec<Point>) -> Result<Self> {
        let closed = vertices.len() > 1 && vertices.first() == vertices.last();
        let base = if closed { vertices.len() - 1 } else { vertices.len() };
        if base < MIN_POLYGON_VERTICES {
            return Err(PolymaskError::TooFewVertices { count: base });
        }
        if !closed {
            vertices.push(vertices[0]);
        }
        Ok(Self { vertices })
    }

    /// All vertices including the closing one.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Vertices without the closing duplicate.
    pub fn base_vertices(&self) -> &[Point] {
        &self.vertices[..self.vertices.len() - 1]
    }

    /// Enclosed area (shoelace formula).
    pub fn area(&self) -> f32 {
        let sum: f32 = self
            .vertices
            .windows(2)
            .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
            .sum();
        sum.abs() / 2.0
    }

    pub fn flattened(&self) -> Vec<f32> {
        geometry::flatten(&self.vertices, None)
    }
}

/// Append-only list of the masks drawn on one image.
#[derive(Clone, Debug, Default)]
pub struct MaskRegistry {
    masks: Vec<Mask>,
}

impl MaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a closed polygon and draw it on the mask layer of `surface`.
    ///
    /// Rejects inputs with fewer than three base vertices, leaving the
    /// registry and the surface untouched.
    pub fn commit(
        &mut self,
        vertices: Vec<Point>,
        style: &DrawingStyle,
        surface: &mut dyn CanvasSurface,
    ) -> Result<MaskId> {
        let mask = match Mask::new(vertices) {
            Ok(mask) => mask,
            Err(e) => {
                error!("mask commit rejected: {e}");
                return Err(PolymaskError::PreconditionViolation {
                    operation: "MaskRegistry::commit",
                    reason: e.to_string(),
                });
            }
        };
        surface.add_persistent_shape(&ShapeDescription {
            points: mask.flattened(),
            closed: true,
            fill: Some(style.mask_fill),
            stroke: style.stroke,
            stroke_width: style.stroke_width,
        });
        let id = MaskId(self.masks.len());
        info!(
            "committed mask {} ({} vertices)",
            id.0,
            mask.base_vertices().len()
        );
        self.masks.push(mask);
        Ok(id)
    }

    pub fn get(&self, id: MaskId) -> Option<&Mask> {
        self.masks.get(id.0)
    }

    pub fn masks(&self) -> &[Mask] {
        &self.masks
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }
}
