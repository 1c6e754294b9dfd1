//! Spatial indexing for fast nearest-site lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;
#[cfg(feature = "spatial-index")]
use glam::DVec2;

/// Wrapper around KD-tree for nearest-site queries
///
/// Gives the same answer as a linear scan over the sites, including the
/// tie break: among equally near sites the one earliest in input order wins.
///
/// # Performance
///
/// - Construction: O(n log n)
/// - Query: O(log n) plus the number of sites tied for nearest
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
    locations: Vec<DVec2>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build spatial index from site locations
    ///
    /// Returns `None` for an empty slice.
    ///
    /// # Example
    ///
    /// ```
    /// use territory_contours::*;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let locations = vec![DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)];
    /// let index = SpatialIndex::new(&locations).unwrap();
    /// assert_eq!(index.find_nearest(DVec2::new(8.0, 1.0)), 1);
    /// # }
    /// ```
    pub fn new(locations: &[DVec2]) -> Option<Self> {
        if locations.is_empty() {
            return None;
        }

        let points: Vec<[f64; 2]> = locations.iter().map(|p| [p.x, p.y]).collect();

        Some(Self {
            tree: ImmutableKdTree::new_from_slice(&points),
            locations: locations.to_vec(),
        })
    }

    /// Index of the site nearest to `position`
    pub fn find_nearest(&self, position: DVec2) -> usize {
        let query = [position.x, position.y];
        let nearest = self.tree.nearest_one::<SquaredEuclidean>(&query);

        // Widen the radius slightly so every site tied with the nearest one is
        // returned, then settle the tie on exact distance and input order.
        let radius = nearest.distance * (1.0 + 1e-9) + f64::EPSILON;
        let candidates = self.tree.within_unsorted::<SquaredEuclidean>(&query, radius);

        let mut best = nearest.item as usize;
        let mut best_distance = position.distance_squared(self.locations[best]);
        for candidate in candidates {
            let index = candidate.item as usize;
            let d = position.distance_squared(self.locations[index]);
            if d < best_distance || (d == best_distance && index < best) {
                best = index;
                best_distance = d;
            }
        }
        best
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
