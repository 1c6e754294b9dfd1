//! Mode dispatch and the caller-owned territory layer

use crate::config::{TerritoryMode, TerritoryStyle};
use crate::contour::{sample_grid, trace};
use crate::error::{Result, TerritoryError};
use crate::shapes::TerritoryGeometry;
use crate::site::{Faction, Site, WorldSnapshot};
use crate::tessellation::tessellate;

/// Zoom percentage above which the territory layer is hidden
pub const VISIBILITY_ZOOM_THRESHOLD: f64 = 100.0;

/// A way of turning owned sites into territory geometry
pub trait TerritoryStrategy {
    /// Compute every layer for one pass; `style` is already validated
    fn compute(
        &self,
        sites: &[Site],
        factions: &[Faction],
        style: &TerritoryStyle,
    ) -> Result<TerritoryGeometry>;
}

/// Sampled grid traced into soft contour regions with border strokes
#[derive(Debug, Clone, Copy, Default)]
pub struct GridContours;

impl TerritoryStrategy for GridContours {
    fn compute(
        &self,
        sites: &[Site],
        factions: &[Faction],
        style: &TerritoryStyle,
    ) -> Result<TerritoryGeometry> {
        let grid = sample_grid(sites, factions, style);
        Ok(TerritoryGeometry {
            layers: trace(&grid, factions, style),
        })
    }
}

/// Exact Voronoi partition clamped to the style's maximum distance
#[derive(Debug, Clone, Copy, Default)]
pub struct Tessellation;

impl TerritoryStrategy for Tessellation {
    fn compute(
        &self,
        sites: &[Site],
        factions: &[Faction],
        style: &TerritoryStyle,
    ) -> Result<TerritoryGeometry> {
        Ok(TerritoryGeometry {
            layers: tessellate(sites, factions, style.max_distance)?,
        })
    }
}

fn validate_sites(sites: &[Site]) -> Result<()> {
    for site in sites {
        if !site.location.is_finite() {
            return Err(TerritoryError::InvalidSite {
                site: site.id,
                reason: format!("non-finite location {:?}", site.location),
            });
        }
    }
    Ok(())
}

/// Compute territory geometry for `sites` with the strategy `style.mode` selects
///
/// Pure: identical inputs give identical output. Nothing is produced when the
/// style or a site location is invalid.
///
/// # Example
///
/// ```rust
/// use territory_contours::*;
///
/// let factions = vec![Faction::new(1, Rgb(0x3366ff))];
/// let sites = vec![Site::owned(0, 0.0, 0.0, FactionId(1))];
/// let style = TerritoryStyleBuilder::new()
///     .cell_size(10.0).unwrap()
///     .territory_radius(20.0).unwrap()
///     .build().unwrap();
///
/// let geometry = compute_territories(&sites, &factions, &style).unwrap();
/// assert!(geometry.layer(FactionId(1)).is_some());
/// ```
pub fn compute_territories(
    sites: &[Site],
    factions: &[Faction],
    style: &TerritoryStyle,
) -> Result<TerritoryGeometry> {
    style.validate()?;
    validate_sites(sites)?;

    let geometry = match style.mode {
        TerritoryMode::Grid => GridContours.compute(sites, factions, style)?,
        TerritoryMode::Tessellation => Tessellation.compute(sites, factions, style)?,
    };

    log::debug!(
        "{} territories: {} sites, {} factions -> {} polygons, {} segments",
        style.mode,
        sites.len(),
        factions.len(),
        geometry.polygon_count(),
        geometry.segment_count()
    );

    Ok(geometry)
}

/// Territory layer bound to a world snapshot
///
/// Holds the last emitted geometry for the renderer and the zoom-based
/// visibility flag. Every [`draw`](Territories::draw) is a full recompute.
///
/// # Example
///
/// ```rust
/// use territory_contours::*;
///
/// let mut territories = Territories::new();
/// territories.setup(WorldSnapshot::new(
///     vec![Site::owned(0, 0.0, 0.0, FactionId(1))],
///     vec![Faction::new(1, Rgb(0xff8800))],
/// ));
///
/// let geometry = territories.draw(&TerritoryStyle::default()).unwrap();
/// assert!(!geometry.is_empty());
///
/// territories.set_visibility(150.0);
/// assert!(!territories.is_visible());
/// ```
#[derive(Debug, Clone)]
pub struct Territories {
    snapshot: WorldSnapshot,
    geometry: TerritoryGeometry,
    zoom_percent: f64,
    visible: bool,
}

impl Default for Territories {
    fn default() -> Self {
        Self {
            snapshot: WorldSnapshot::default(),
            geometry: TerritoryGeometry::default(),
            zoom_percent: VISIBILITY_ZOOM_THRESHOLD,
            visible: true,
        }
    }
}

impl Territories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the source data used by subsequent draws
    pub fn setup(&mut self, snapshot: WorldSnapshot) {
        log::debug!(
            "territory layer bound to {} sites, {} factions",
            snapshot.sites.len(),
            snapshot.factions.len()
        );
        self.snapshot = snapshot;
    }

    /// Clear the previous geometry and recompute it with `style`
    ///
    /// On error the layer is left empty.
    pub fn draw(&mut self, style: &TerritoryStyle) -> Result<&TerritoryGeometry> {
        self.geometry.clear();

        let geometry = compute_territories(&self.snapshot.sites, &self.snapshot.factions, style)?;
        self.geometry = geometry;
        self.set_visibility(self.zoom_percent);

        Ok(&self.geometry)
    }

    /// Show the layer at or below 100% zoom, hide it above
    pub fn set_visibility(&mut self, zoom_percent: f64) {
        self.zoom_percent = zoom_percent;
        self.visible = zoom_percent <= VISIBILITY_ZOOM_THRESHOLD;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Geometry from the last successful draw
    pub fn geometry(&self) -> &TerritoryGeometry {
        &self.geometry
    }

    pub fn snapshot(&self) -> &WorldSnapshot {
        &self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerritoryStyleBuilder;
    use crate::shapes::Rgb;
    use crate::site::FactionId;

    fn snapshot() -> WorldSnapshot {
        WorldSnapshot::new(
            vec![
                Site::owned(0, -50.0, 0.0, FactionId(1)),
                Site::owned(1, 50.0, 0.0, FactionId(2)),
            ],
            vec![Faction::new(1, Rgb(0xff0000)), Faction::new(2, Rgb(0x00ff00))],
        )
    }

    #[test]
    fn test_dispatch_by_mode() {
        let world = snapshot();

        let grid_style = TerritoryStyle::default();
        let grid = compute_territories(&world.sites, &world.factions, &grid_style).unwrap();
        assert!(grid.segment_count() > 0);

        let tess_style = TerritoryStyle {
            mode: TerritoryMode::Tessellation,
            ..TerritoryStyle::default()
        };
        let tess = compute_territories(&world.sites, &world.factions, &tess_style).unwrap();
        assert_eq!(tess.segment_count(), 0);
        assert_eq!(tess.polygon_count(), 2);
    }

    #[test]
    fn test_strategies_match_dispatch() {
        let world = snapshot();
        let style = TerritoryStyle::default();

        let direct = GridContours
            .compute(&world.sites, &world.factions, &style)
            .unwrap();
        let dispatched = compute_territories(&world.sites, &world.factions, &style).unwrap();
        assert_eq!(direct, dispatched);
    }

    #[test]
    fn test_invalid_style_rejected() {
        let world = snapshot();
        let style = TerritoryStyle {
            cell_size: 0.0,
            ..TerritoryStyle::default()
        };

        let err = compute_territories(&world.sites, &world.factions, &style).unwrap_err();
        assert!(matches!(err, TerritoryError::InvalidConfig(_)));
    }

    #[test]
    fn test_non_finite_site_rejected() {
        let sites = vec![Site::unowned(4, f64::INFINITY, 0.0)];
        let err = compute_territories(&sites, &[], &TerritoryStyle::default()).unwrap_err();
        assert!(matches!(err, TerritoryError::InvalidSite { .. }));
    }

    #[test]
    fn test_draw_replaces_geometry() {
        let mut territories = Territories::new();
        assert!(territories.geometry().is_empty());

        territories.setup(snapshot());
        let first = territories.draw(&TerritoryStyle::default()).unwrap().clone();
        assert!(!first.is_empty());

        let second = territories.draw(&TerritoryStyle::default()).unwrap();
        assert_eq!(&first, second);
    }

    #[test]
    fn test_failed_draw_clears_geometry() {
        let mut territories = Territories::new();
        territories.setup(snapshot());
        territories.draw(&TerritoryStyle::default()).unwrap();

        let bad = TerritoryStyle {
            mode: TerritoryMode::Tessellation,
            max_distance: -1.0,
            ..TerritoryStyle::default()
        };
        assert!(territories.draw(&bad).is_err());
        assert!(territories.geometry().is_empty());
    }

    #[test]
    fn test_visibility_threshold() {
        let mut territories = Territories::new();
        assert!(territories.is_visible());

        territories.set_visibility(100.0);
        assert!(territories.is_visible());

        territories.set_visibility(100.5);
        assert!(!territories.is_visible());

        // A redraw keeps the last zoom decision
        territories.setup(snapshot());
        territories.draw(&TerritoryStyle::default()).unwrap();
        assert!(!territories.is_visible());

        territories.set_visibility(25.0);
        assert!(territories.is_visible());
    }

    #[test]
    fn test_builder_style_draws() {
        let style = TerritoryStyleBuilder::new()
            .mode(TerritoryMode::Tessellation)
            .max_distance(80.0)
            .unwrap()
            .build()
            .unwrap();

        let mut territories = Territories::new();
        territories.setup(snapshot());
        let geometry = territories.draw(&style).unwrap();
        assert!(geometry.vertices().all(|v| v.x.abs() <= 130.0 + 1e-9));
    }
}
