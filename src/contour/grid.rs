//! Scalar-field sampling of site ownership onto a regular grid

use glam::DVec2;

use crate::config::{NearestLookup, TerritoryStyle};
use crate::error::{Result, TerritoryError};
use crate::geometry::{distance, Bounds};
use crate::site::{faction_index, Faction, Site};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// Owner classification of every grid vertex
///
/// Vertices are stored column-major (`ix` outer) and hold the index of the
/// owning faction in the faction list the grid was sampled against.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    min: DVec2,
    cell_size: f64,
    /// Number of cells along x (vertices = width + 1)
    width: usize,
    /// Number of cells along y (vertices = height + 1)
    height: usize,
    owners: Vec<Option<usize>>,
}

impl Grid {
    /// Grid with no cells
    pub fn empty(cell_size: f64) -> Self {
        Self {
            min: DVec2::ZERO,
            cell_size,
            width: 0,
            height: 0,
            owners: Vec::new(),
        }
    }

    /// Build a grid from an owner matrix indexed `[ix][iy]`
    ///
    /// Every column must have the same length. Fewer than two columns or rows
    /// of vertices give a grid without cells.
    pub fn from_owners(min: DVec2, cell_size: f64, columns: &[Vec<Option<usize>>]) -> Result<Self> {
        let rows = columns.first().map(Vec::len).unwrap_or(0);
        if columns.iter().any(|c| c.len() != rows) {
            return Err(TerritoryError::GenerationFailed(
                "owner matrix columns differ in length".into(),
            ));
        }
        if columns.len() < 2 || rows < 2 {
            return Ok(Self::empty(cell_size));
        }

        Ok(Self {
            min,
            cell_size,
            width: columns.len() - 1,
            height: rows - 1,
            owners: columns.iter().flatten().copied().collect(),
        })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Cells along x
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Cells along y
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Position of the first grid vertex
    #[inline]
    pub fn min(&self) -> DVec2 {
        self.min
    }

    /// Area covered by the grid vertices
    pub fn bounds(&self) -> Bounds {
        let extent = DVec2::new(self.width as f64, self.height as f64) * self.cell_size;
        Bounds::new(self.min, self.min + extent)
    }

    /// Owner of vertex `(ix, iy)`; `None` outside the grid or when unowned
    #[inline]
    pub fn owner_at(&self, ix: usize, iy: usize) -> Option<usize> {
        if self.is_empty() || ix > self.width || iy > self.height {
            return None;
        }
        self.owners[ix * (self.height + 1) + iy]
    }

    /// Absolute position of vertex `(ix, iy)`
    #[inline]
    pub fn vertex_position(&self, ix: usize, iy: usize) -> DVec2 {
        self.min + DVec2::new(ix as f64, iy as f64) * self.cell_size
    }

    /// Absolute position of the top-left vertex of cell `(ix, iy)`
    #[inline]
    pub fn cell_origin(&self, ix: usize, iy: usize) -> DVec2 {
        self.vertex_position(ix, iy)
    }

    /// Iterate `(ix, iy, owner)` over every vertex, column-major
    pub fn vertices(&self) -> impl Iterator<Item = (usize, usize, Option<usize>)> + '_ {
        let rows = self.height + 1;
        self.owners
            .iter()
            .enumerate()
            .map(move |(i, owner)| (i / rows, i % rows, *owner))
    }
}

/// Expanded sampling area around the sites
///
/// Snaps the tight site bounds to multiples of the cell size, pads by
/// `floor(1.5 × radius / cell) × cell` plus a trailing fence cell on the high
/// side, and steps one more cell down on any axis whose minimum is negative
/// (`%` truncates towards zero, so negative minimums snap upwards).
pub fn grid_bounds(site_bounds: Bounds, cell_size: f64, territory_radius: f64) -> Bounds {
    let padding = (territory_radius * 1.5 / cell_size).floor() * cell_size;

    let mut min = site_bounds.min;
    let mut max = site_bounds.max;

    min.x -= min.x % cell_size;
    min.x -= padding;
    min.y -= min.y % cell_size;
    min.y -= padding;

    max.x -= max.x % cell_size;
    max.x += cell_size + padding;
    max.y -= max.y % cell_size;
    max.y += cell_size + padding;

    if min.x < 0.0 {
        min.x -= cell_size;
    }
    if min.y < 0.0 {
        min.y -= cell_size;
    }

    Bounds::new(min, max)
}

/// Nearest site by linear scan; ties go to the earliest site
///
/// Compares squared distances, as the KD-tree lookup does, and returns the
/// plain distance of the winner.
pub fn nearest_site(locations: &[DVec2], point: DVec2) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, location) in locations.iter().enumerate() {
        let d2 = point.distance_squared(*location);
        if best.map_or(true, |(_, best_d2)| d2 < best_d2) {
            best = Some((index, d2));
        }
    }
    best.map(|(index, _)| (index, distance(point, locations[index])))
}

enum SiteLocator<'a> {
    Linear(&'a [DVec2]),
    #[cfg(feature = "spatial-index")]
    Indexed(SpatialIndex, &'a [DVec2]),
}

impl<'a> SiteLocator<'a> {
    fn new(locations: &'a [DVec2], lookup: NearestLookup) -> Self {
        match lookup {
            NearestLookup::LinearScan => SiteLocator::Linear(locations),
            #[cfg(feature = "spatial-index")]
            NearestLookup::KdTree => match SpatialIndex::new(locations) {
                Some(index) => SiteLocator::Indexed(index, locations),
                None => SiteLocator::Linear(locations),
            },
            #[cfg(not(feature = "spatial-index"))]
            NearestLookup::KdTree => SiteLocator::Linear(locations),
        }
    }

    fn nearest(&self, point: DVec2) -> Option<(usize, f64)> {
        match self {
            SiteLocator::Linear(locations) => nearest_site(locations, point),
            #[cfg(feature = "spatial-index")]
            SiteLocator::Indexed(index, locations) => {
                let nearest = index.find_nearest(point);
                Some((nearest, distance(point, locations[nearest])))
            }
        }
    }
}

/// Classify every grid vertex by its nearest site
///
/// A vertex takes the nearest site's owner when that site is strictly closer
/// than `territory_radius`, and stays unowned otherwise. No sites give an
/// empty grid.
pub fn sample_grid(sites: &[Site], factions: &[Faction], style: &TerritoryStyle) -> Grid {
    let cell_size = style.cell_size;

    let Some(site_bounds) = Bounds::from_points(sites.iter().map(|s| s.location)) else {
        return Grid::empty(cell_size);
    };

    let bounds = grid_bounds(site_bounds, cell_size, style.territory_radius);
    let width = (bounds.width() / cell_size).round() as usize;
    let height = (bounds.height() / cell_size).round() as usize;

    let locations: Vec<DVec2> = sites.iter().map(|s| s.location).collect();
    let site_owners: Vec<Option<usize>> = sites
        .iter()
        .map(|s| faction_index(factions, s.owner))
        .collect();
    let locator = SiteLocator::new(&locations, style.nearest_lookup);

    let mut owners = Vec::with_capacity((width + 1) * (height + 1));
    for ix in 0..=width {
        for iy in 0..=height {
            let point = bounds.min + DVec2::new(ix as f64, iy as f64) * cell_size;
            let owner = match locator.nearest(point) {
                Some((site, d)) if d < style.territory_radius => site_owners[site],
                _ => None,
            };
            owners.push(owner);
        }
    }

    log::debug!(
        "sampled {}x{} territory grid from {} sites (origin {:?}, cell {})",
        width + 1,
        height + 1,
        sites.len(),
        bounds.min,
        cell_size
    );

    Grid {
        min: bounds.min,
        cell_size,
        width,
        height,
        owners,
    }
}
