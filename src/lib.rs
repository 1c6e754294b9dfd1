//! Faction territory boundaries for 2D maps
//!
//! Turns a set of owned point sites (stars, cities, outposts) into per-faction
//! fill polygons and border strokes ready for any renderer (canvas, wgpu,
//! Bevy, SVG, etc.)
//!
//! Two modes are available:
//!
//! - **Grid**: ownership is sampled on a regular grid and traced with a
//!   16-case contour table into soft, blobby regions with stroked borders.
//! - **Tessellation**: an exact Voronoi partition of the sites, with every
//!   cell clamped to a maximum distance from its site.
//!
//! # Quick Start
//!
//! ```rust
//! use territory_contours::*;
//!
//! let factions = vec![Faction::new(1, Rgb(0xd13f3f)), Faction::new(2, Rgb(0x3f6fd1))];
//! let sites = vec![
//!     Site::owned(0, -50.0, 0.0, FactionId(1)),
//!     Site::owned(1, 50.0, 0.0, FactionId(2)),
//!     Site::unowned(2, 0.0, 120.0),
//! ];
//!
//! let mut territories = Territories::new();
//! territories.setup(WorldSnapshot::new(sites, factions));
//!
//! let style = TerritoryStyle::from_map_settings(2.0, 3.0, 1.0);
//! let geometry = territories.draw(&style).unwrap();
//! println!(
//!     "{} polygons, {} border segments",
//!     geometry.polygon_count(),
//!     geometry.segment_count()
//! );
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): KD-tree nearest-site lookups for the grid sampler
//! - `serde`: Serialization support for sites, styles and emitted shapes

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod site;
pub mod shapes;
pub mod contour;
pub mod tessellation;
pub mod territories;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{TerritoryError, Result};
pub use config::{NearestLookup, TerritoryMode, TerritoryStyle, TerritoryStyleBuilder, DEFAULT_MAX_DISTANCE};
pub use site::{Faction, FactionId, Site, SiteId, WorldSnapshot};
pub use shapes::{FillPolygon, FillStyle, LineCap, LineSegment, Rgb, RgbaColor, StrokeStyle, TerritoryGeometry, TerritoryShapes};
pub use contour::{ContourTable, Grid};
pub use tessellation::TessellatedCell;
pub use territories::{compute_territories, GridContours, Territories, TerritoryStrategy, Tessellation, VISIBILITY_ZOOM_THRESHOLD};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
