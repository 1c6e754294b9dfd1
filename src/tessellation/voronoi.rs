//! Bounded Voronoi cells from a Delaunay triangulation
//!
//! Each cell starts as the padded bounding box and is cut down by the
//! perpendicular bisector towards every Delaunay neighbour of its site. The
//! result is the exact Voronoi region restricted to the box, with vertices in
//! the box's winding order.

use glam::DVec2;
use spade::{mitigate_underflow, DelaunayTriangulation, Point2, Triangulation};

use crate::error::{Result, TerritoryError};
use crate::geometry::{angle_between, distance, point_from_angle, Bounds};
use crate::site::Site;

/// A Voronoi cell after clipping and distance clamping
#[derive(Debug, Clone, PartialEq)]
pub struct TessellatedCell {
    /// Index of the owning site in the input slice
    pub site_index: usize,
    /// Boundary vertices, each within the maximum distance of the site
    pub vertices: Vec<DVec2>,
}

/// Pull `point` in to `max_distance` from `site` along the same bearing
///
/// Points already within range are returned unchanged.
pub fn clamp_to_radius(site: DVec2, point: DVec2, max_distance: f64) -> DVec2 {
    if distance(site, point) > max_distance {
        point_from_angle(site, angle_between(site, point), max_distance)
    } else {
        point
    }
}

/// Keep the part of `polygon` closer to `site` than to `neighbor`
///
/// Sutherland-Hodgman against a single half-plane.
pub fn clip_to_bisector(polygon: &[DVec2], site: DVec2, neighbor: DVec2) -> Vec<DVec2> {
    let normal = neighbor - site;
    let limit = normal.length_squared() * 0.5;
    let side = |p: DVec2| (p - site).dot(normal) - limit;

    let n = polygon.len();
    let mut clipped = Vec::with_capacity(n + 1);
    for i in 0..n {
        let current = polygon[i];
        let next = polygon[(i + 1) % n];
        let d_current = side(current);
        let d_next = side(next);

        if d_current <= 0.0 {
            clipped.push(current);
        }
        if (d_current <= 0.0) != (d_next <= 0.0) {
            let t = d_current / (d_current - d_next);
            clipped.push(current + (next - current) * t);
        }
    }
    clipped
}

/// Drop vertices that coincide with their predecessor, including across the
/// closing edge. Bisectors through an existing corner leave such pairs.
fn remove_coincident(polygon: &mut Vec<DVec2>) {
    const EPSILON: f64 = 1e-9;

    polygon.dedup_by(|a, b| a.distance_squared(*b) <= EPSILON * EPSILON);
    while polygon.len() > 1 {
        match (polygon.first(), polygon.last()) {
            (Some(first), Some(last)) if first.distance_squared(*last) <= EPSILON * EPSILON => {
                polygon.pop();
            }
            _ => break,
        }
    }
}

/// Compute one clamped cell per distinct site location
///
/// The diagram is bounded by the site bounds grown by `max_distance`. Sites
/// sharing a location share one cell, owned by the earliest of them. Cells
/// that degenerate to fewer than three vertices are skipped.
///
/// # Errors
///
/// Returns `InvalidSite` for coordinates the triangulation cannot accept
/// (NaN, infinite or beyond its maximum magnitude). Subnormal-range values
/// are flushed to zero first.
pub fn voronoi_cells(sites: &[Site], max_distance: f64) -> Result<Vec<TessellatedCell>> {
    let Some(site_bounds) = Bounds::from_points(sites.iter().map(|s| s.location)) else {
        return Ok(Vec::new());
    };
    let bounds = site_bounds.expanded(max_distance);

    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    // Vertex index -> first site inserted at that location
    let mut vertex_sites: Vec<Option<usize>> = Vec::with_capacity(sites.len());

    for (index, site) in sites.iter().enumerate() {
        let handle = triangulation
            .insert(mitigate_underflow(Point2::new(
                site.location.x,
                site.location.y,
            )))
            .map_err(|e| TerritoryError::InvalidSite {
                site: site.id,
                reason: format!("rejected by triangulation: {:?}", e),
            })?;

        let slot = handle.index();
        if vertex_sites.len() <= slot {
            vertex_sites.resize(slot + 1, None);
        }
        match vertex_sites[slot] {
            None => vertex_sites[slot] = Some(index),
            Some(first) => log::warn!(
                "site {:?} shares its location with site {:?}; only the first gets a cell",
                site.id,
                sites[first].id
            ),
        }
    }

    let mut cells = Vec::with_capacity(triangulation.num_vertices());
    for vertex in triangulation.vertices() {
        let Some(site_index) = vertex_sites.get(vertex.fix().index()).copied().flatten() else {
            continue;
        };
        let site = sites[site_index].location;

        let mut polygon = bounds.corners().to_vec();
        for edge in vertex.out_edges() {
            let neighbor = edge.to().position();
            polygon = clip_to_bisector(&polygon, site, DVec2::new(neighbor.x, neighbor.y));
            if polygon.is_empty() {
                break;
            }
        }

        remove_coincident(&mut polygon);
        if polygon.len() < 3 {
            log::warn!(
                "skipping degenerate cell for site {:?} ({} vertices)",
                sites[site_index].id,
                polygon.len()
            );
            continue;
        }

        let vertices = polygon
            .into_iter()
            .map(|p| clamp_to_radius(site, p, max_distance))
            .collect();

        cells.push(TessellatedCell {
            site_index,
            vertices,
        });
    }

    // Site order keeps the output independent of the triangulation's storage
    cells.sort_by_key(|c| c.site_index);
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clamp_to_radius() {
        let site = DVec2::new(10.0, 10.0);

        let inside = DVec2::new(12.0, 10.0);
        assert_eq!(clamp_to_radius(site, inside, 5.0), inside);

        let clamped = clamp_to_radius(site, DVec2::new(10.0, 30.0), 5.0);
        assert_relative_eq!(clamped.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(clamped.y, 15.0, epsilon = 1e-9);

        let diagonal = clamp_to_radius(site, DVec2::new(110.0, 110.0), 5.0);
        assert_relative_eq!(diagonal.distance(site), 5.0, epsilon = 1e-9);
        assert_relative_eq!(diagonal.x - site.x, diagonal.y - site.y, epsilon = 1e-9);
    }

    #[test]
    fn test_clip_to_bisector() {
        let square = vec![
            DVec2::new(-10.0, -10.0),
            DVec2::new(10.0, -10.0),
            DVec2::new(10.0, 10.0),
            DVec2::new(-10.0, 10.0),
        ];

        let clipped = clip_to_bisector(&square, DVec2::new(-5.0, 0.0), DVec2::new(5.0, 0.0));
        assert_eq!(clipped.len(), 4);
        assert!(clipped.iter().all(|p| p.x <= 1e-12));
        assert!(clipped.contains(&DVec2::new(0.0, -10.0)));
        assert!(clipped.contains(&DVec2::new(0.0, 10.0)));
    }

    #[test]
    fn test_remove_coincident() {
        let mut polygon = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1e-12),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 0.0),
        ];
        remove_coincident(&mut polygon);
        assert_eq!(
            polygon,
            vec![DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), DVec2::new(1.0, 1.0)]
        );
    }

    #[test]
    fn test_no_sites_no_cells() {
        assert!(voronoi_cells(&[], 100.0).unwrap().is_empty());
    }

    #[test]
    fn test_single_site_cell_is_clamped_box() {
        let sites = vec![Site::unowned(0, 0.0, 0.0)];
        let cells = voronoi_cells(&sites, 100.0).unwrap();

        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].site_index, 0);
        assert_eq!(cells[0].vertices.len(), 4);
        for v in &cells[0].vertices {
            // Box corners sit at 100·√2 and are pulled in to 100
            assert_relative_eq!(v.length(), 100.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_two_sites_split_at_bisector() {
        let sites = vec![Site::unowned(0, -50.0, 0.0), Site::unowned(1, 50.0, 0.0)];
        let cells = voronoi_cells(&sites, 500.0).unwrap();

        assert_eq!(cells.len(), 2);
        assert!(cells[0].vertices.iter().all(|v| v.x <= 1e-9));
        assert!(cells[1].vertices.iter().all(|v| v.x >= -1e-9));
    }

    #[test]
    fn test_square_lattice_cells() {
        let mut sites = Vec::new();
        let mut id = 0;
        for x in 0..3 {
            for y in 0..3 {
                sites.push(Site::unowned(id, x as f64 * 10.0, y as f64 * 10.0));
                id += 1;
            }
        }

        let cells = voronoi_cells(&sites, 1000.0).unwrap();
        assert_eq!(cells.len(), 9);

        // Centre site (10, 10) owns the square [5, 15]²
        let centre = cells.iter().find(|c| c.site_index == 4).unwrap();
        assert_eq!(centre.vertices.len(), 4);
        for v in &centre.vertices {
            assert_relative_eq!((v.x - 10.0).abs(), 5.0, epsilon = 1e-9);
            assert_relative_eq!((v.y - 10.0).abs(), 5.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_duplicate_locations_share_one_cell() {
        let sites = vec![
            Site::unowned(0, 0.0, 0.0),
            Site::unowned(1, 0.0, 0.0),
            Site::unowned(2, 40.0, 0.0),
        ];
        let cells = voronoi_cells(&sites, 100.0).unwrap();

        let owners: Vec<usize> = cells.iter().map(|c| c.site_index).collect();
        assert_eq!(owners, vec![0, 2]);
    }

    #[test]
    fn test_nan_site_rejected() {
        let sites = vec![Site::unowned(0, 0.0, 0.0), Site::unowned(5, f64::NAN, 1.0)];
        let err = voronoi_cells(&sites, 100.0).unwrap_err();
        assert!(matches!(err, TerritoryError::InvalidSite { site, .. } if site.0 == 5));
    }

    #[test]
    fn test_tiny_coordinates_flushed_to_zero() {
        let sites = vec![Site::unowned(0, 0.0, 0.0), Site::unowned(1, 1e-50, 100.0)];
        let cells = voronoi_cells(&sites, 200.0).unwrap();

        assert_eq!(cells.len(), 2);
        assert!(cells[1].vertices.iter().all(|v| v.y >= 50.0 - 1e-9));
    }

    #[test]
    fn test_huge_site_rejected() {
        let sites = vec![Site::unowned(0, 0.0, 0.0), Site::unowned(3, 1e300, 0.0)];
        let err = voronoi_cells(&sites, 100.0).unwrap_err();
        assert!(matches!(err, TerritoryError::InvalidSite { site, .. } if site.0 == 3));
    }

    #[test]
    fn test_collinear_sites() {
        let sites = vec![
            Site::unowned(0, 0.0, 0.0),
            Site::unowned(1, 10.0, 0.0),
            Site::unowned(2, 20.0, 0.0),
        ];
        let cells = voronoi_cells(&sites, 50.0).unwrap();
        assert_eq!(cells.len(), 3);

        let middle = &cells[1];
        assert!(middle.vertices.iter().all(|v| v.x >= 5.0 - 1e-9 && v.x <= 15.0 + 1e-9));
    }
}
