//! Renderer-ready territory shapes
//!
//! Engine-agnostic polygons and line segments in absolute map coordinates.
//! A canvas, a GPU tessellator or an SVG writer can draw them directly.

mod colors;

pub use colors::{Rgb, RgbaColor};

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::site::FactionId;

/// Line end cap
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Round,
    Butt,
}

/// Fill paint for a polygon
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillStyle {
    pub color: Rgb,
    pub alpha: f32,
}

impl FillStyle {
    /// RGBA color for renderers that take normalised floats
    pub fn rgba(&self) -> RgbaColor {
        self.color.to_rgba(self.alpha)
    }
}

/// Stroke paint for lines and polygon outlines
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgb,
    pub alpha: f32,
    pub width: f64,
    pub cap: LineCap,
}

impl StrokeStyle {
    pub fn rgba(&self) -> RgbaColor {
        self.color.to_rgba(self.alpha)
    }
}

/// Closed polygon; the last vertex connects back to the first
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FillPolygon {
    pub vertices: Vec<DVec2>,
    pub fill: FillStyle,
    /// Outline drawn along every edge, if any
    pub outline: Option<StrokeStyle>,
}

impl FillPolygon {
    /// Signed area (positive when counter-clockwise in a y-up frame)
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }

        let mut twice_area = 0.0;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            twice_area += a.perp_dot(b);
        }
        twice_area * 0.5
    }
}

/// Straight stroked segment
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: DVec2,
    pub end: DVec2,
    pub stroke: StrokeStyle,
}

/// Everything emitted for one owner
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TerritoryShapes {
    /// Owning faction, `None` for the neutral (unowned) layer
    pub owner: Option<FactionId>,
    /// Fills in emission order
    pub polygons: Vec<FillPolygon>,
    /// Border strokes in emission order
    pub segments: Vec<LineSegment>,
}

impl TerritoryShapes {
    pub fn new(owner: Option<FactionId>) -> Self {
        Self {
            owner,
            polygons: Vec::new(),
            segments: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty() && self.segments.is_empty()
    }
}

/// Output of one territory pass, layers in painter's order
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TerritoryGeometry {
    pub layers: Vec<TerritoryShapes>,
}

impl TerritoryGeometry {
    /// Total number of fill polygons across all layers
    pub fn polygon_count(&self) -> usize {
        self.layers.iter().map(|l| l.polygons.len()).sum()
    }

    /// Total number of line segments across all layers
    pub fn segment_count(&self) -> usize {
        self.layers.iter().map(|l| l.segments.len()).sum()
    }

    /// True when nothing would be drawn
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(TerritoryShapes::is_empty)
    }

    /// Layer owned by `faction`, if present
    pub fn layer(&self, faction: FactionId) -> Option<&TerritoryShapes> {
        self.layers.iter().find(|l| l.owner == Some(faction))
    }

    /// Neutral layer for unowned regions, if present
    pub fn neutral_layer(&self) -> Option<&TerritoryShapes> {
        self.layers.iter().find(|l| l.owner.is_none())
    }

    /// Every emitted point: polygon vertices then segment endpoints, per layer
    pub fn vertices(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.layers.iter().flat_map(|layer| {
            layer
                .polygons
                .iter()
                .flat_map(|p| p.vertices.iter().copied())
                .chain(layer.segments.iter().flat_map(|s| [s.start, s.end]))
        })
    }

    /// Drop all layers
    pub fn clear(&mut self) {
        self.layers.clear();
    }
}
