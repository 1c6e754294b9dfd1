//! Tessellation-mode territories
//!
//! One Voronoi cell per site, clamped to a maximum distance from the site so
//! outer cells stay bounded. Cells are filled with their owner's color, or
//! black when unowned, and outlined in white.

mod voronoi;

pub use voronoi::{clamp_to_radius, clip_to_bisector, voronoi_cells, TessellatedCell};

use crate::error::Result;
use crate::shapes::{FillPolygon, FillStyle, LineCap, Rgb, StrokeStyle, TerritoryShapes};
use crate::site::{faction_index, Faction, Site};

/// Fill alpha of tessellation cells
pub const TESSELLATION_FILL_ALPHA: f32 = 0.3;

/// Alpha of tessellation cell outlines
pub const TESSELLATION_STROKE_ALPHA: f32 = 0.3;

/// Width of tessellation cell outlines
pub const TESSELLATION_STROKE_WIDTH: f64 = 1.0;

fn outline() -> StrokeStyle {
    StrokeStyle {
        color: Rgb::WHITE,
        alpha: TESSELLATION_STROKE_ALPHA,
        width: TESSELLATION_STROKE_WIDTH,
        cap: LineCap::Round,
    }
}

/// Build tessellation layers for every faction
///
/// Layer order: a neutral layer first when any cell is unowned, then one
/// layer per faction in faction order (empty for factions owning nothing).
pub fn tessellate(
    sites: &[Site],
    factions: &[Faction],
    max_distance: f64,
) -> Result<Vec<TerritoryShapes>> {
    let cells = voronoi_cells(sites, max_distance)?;

    let mut neutral = TerritoryShapes::new(None);
    let mut layers: Vec<TerritoryShapes> = factions
        .iter()
        .map(|f| TerritoryShapes::new(Some(f.id)))
        .collect();

    for cell in cells {
        let site = &sites[cell.site_index];
        let (layer, color) = match faction_index(factions, site.owner) {
            Some(index) => (&mut layers[index], factions[index].color),
            None => (&mut neutral, Rgb::BLACK),
        };

        layer.polygons.push(FillPolygon {
            vertices: cell.vertices,
            fill: FillStyle {
                color,
                alpha: TESSELLATION_FILL_ALPHA,
            },
            outline: Some(outline()),
        });
    }

    log::trace!(
        "tessellation: {} neutral cells, {} faction layers",
        neutral.polygons.len(),
        layers.len()
    );

    if !neutral.is_empty() {
        layers.insert(0, neutral);
    }
    Ok(layers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::FactionId;

    fn factions() -> Vec<Faction> {
        vec![Faction::new(1, Rgb(0xff0000)), Faction::new(2, Rgb(0x0000ff))]
    }

    #[test]
    fn test_empty_sites_give_empty_faction_layers() {
        let layers = tessellate(&[], &factions(), 200.0).unwrap();
        assert_eq!(layers.len(), 2);
        assert!(layers.iter().all(TerritoryShapes::is_empty));
        assert_eq!(layers[0].owner, Some(FactionId(1)));
    }

    #[test]
    fn test_cells_grouped_by_owner() {
        let sites = vec![
            Site::owned(0, 0.0, 0.0, FactionId(2)),
            Site::owned(1, 50.0, 0.0, FactionId(1)),
            Site::owned(2, 0.0, 50.0, FactionId(2)),
        ];
        let layers = tessellate(&sites, &factions(), 200.0).unwrap();

        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].owner, Some(FactionId(1)));
        assert_eq!(layers[0].polygons.len(), 1);
        assert_eq!(layers[1].polygons.len(), 2);
        assert!(layers.iter().all(|l| l.segments.is_empty()));

        let polygon = &layers[0].polygons[0];
        assert_eq!(polygon.fill.color, Rgb(0xff0000));
        assert_eq!(polygon.fill.alpha, TESSELLATION_FILL_ALPHA);
        let stroke = polygon.outline.unwrap();
        assert_eq!(stroke.color, Rgb::WHITE);
        assert_eq!(stroke.width, 1.0);
    }

    #[test]
    fn test_unowned_and_unknown_owner_go_neutral() {
        let sites = vec![
            Site::unowned(0, 0.0, 0.0),
            Site::owned(1, 100.0, 0.0, FactionId(77)),
            Site::owned(2, 200.0, 0.0, FactionId(1)),
        ];
        let layers = tessellate(&sites, &factions(), 200.0).unwrap();

        assert_eq!(layers.len(), 3);
        assert_eq!(layers[0].owner, None);
        assert_eq!(layers[0].polygons.len(), 2);
        assert!(layers[0].polygons.iter().all(|p| p.fill.color == Rgb::BLACK));
        assert_eq!(layers[1].polygons.len(), 1);
        assert!(layers[2].is_empty());
    }

    #[test]
    fn test_far_apart_sites_stay_within_max_distance() {
        let sites = vec![
            Site::owned(0, 0.0, 0.0, FactionId(1)),
            Site::owned(1, 1000.0, 0.0, FactionId(2)),
        ];
        let layers = tessellate(&sites, &factions(), 200.0).unwrap();

        for (layer, site) in layers.iter().zip(&sites) {
            assert_eq!(layer.polygons.len(), 1);
            for v in &layer.polygons[0].vertices {
                assert!(v.distance(site.location) <= 200.0 + 1e-9);
            }
        }
    }
}
