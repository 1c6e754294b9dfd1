//! Planar geometry helpers shared by the grid and tessellation modes

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Euclidean distance between two locations
#[inline]
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

/// Angle in radians of the direction from `from` towards `to`
///
/// Measured counter-clockwise from the positive x axis, in `(-π, π]`.
#[inline]
pub fn angle_between(from: DVec2, to: DVec2) -> f64 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Point at `distance` from `origin` along `angle`
#[inline]
pub fn point_from_angle(origin: DVec2, angle: f64, distance: f64) -> DVec2 {
    origin + DVec2::from_angle(angle) * distance
}

/// Axis-aligned bounding box
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Tightest box around all points, or `None` for an empty input
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = DVec2>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;

        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    /// Grow the box by `margin` on every side
    pub fn expanded(self, margin: f64) -> Self {
        Self {
            min: self.min - DVec2::splat(margin),
            max: self.max + DVec2::splat(margin),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Inclusive containment test with an absolute tolerance
    pub fn contains(&self, point: DVec2, epsilon: f64) -> bool {
        point.x >= self.min.x - epsilon
            && point.x <= self.max.x + epsilon
            && point.y >= self.min.y - epsilon
            && point.y <= self.max.y + epsilon
    }

    /// Corners in counter-clockwise order starting at `min`
    pub fn corners(&self) -> [DVec2; 4] {
        [
            self.min,
            DVec2::new(self.max.x, self.min.y),
            self.max,
            DVec2::new(self.min.x, self.max.y),
        ]
    }
}
