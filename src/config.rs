//! Territory style configuration and builder
//!
//! A [`TerritoryStyle`] carries everything the engine needs besides the world
//! snapshot: which mode to run and the numeric knobs for it.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerritoryError};

/// Default maximum distance of a tessellation vertex from its site
pub const DEFAULT_MAX_DISTANCE: f64 = 200.0;

/// How territory boundaries are generated
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerritoryMode {
    /// Sampled grid traced with the 16-case contour table
    #[default]
    Grid,
    /// Voronoi cells clamped to a maximum distance from each site
    Tessellation,
}

impl TerritoryMode {
    pub fn name(self) -> &'static str {
        match self {
            TerritoryMode::Grid => "grid",
            TerritoryMode::Tessellation => "tessellation",
        }
    }
}

impl fmt::Display for TerritoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TerritoryMode {
    type Err = TerritoryError;

    /// Accepts `grid`/`marching-square` and `tessellation`/`voronoi`
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "grid" | "marching-square" => Ok(TerritoryMode::Grid),
            "tessellation" | "voronoi" => Ok(TerritoryMode::Tessellation),
            other => Err(TerritoryError::InvalidConfig(format!(
                "unknown territory mode '{}'",
                other
            ))),
        }
    }
}

/// Nearest-site search used by the grid sampler
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NearestLookup {
    /// Scan every site for every grid vertex
    #[default]
    LinearScan,
    /// KD-tree lookup (falls back to the linear scan without `spatial-index`)
    KdTree,
}

/// Style configuration for one territory pass
///
/// Plain data so callers can keep it in their settings. It is validated when
/// a pass runs, not on construction.
///
/// # Example
///
/// ```rust
/// use territory_contours::*;
///
/// let style = TerritoryStyle::from_map_settings(2.0, 1.5, 1.0);
/// assert_eq!(style.cell_size, 10.0);
/// assert_eq!(style.territory_radius, 30.0);
/// assert_eq!(style.line_width(), 10.0 / 16.0);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerritoryStyle {
    pub mode: TerritoryMode,

    /// Edge length of one grid cell in map units
    pub cell_size: f64,

    /// Grid vertices further than this from their nearest site stay unowned
    pub territory_radius: f64,

    /// Border stroke width as a fraction of `cell_size`, in (0, 1)
    ///
    /// At 1 the contour points would land on cell corners.
    pub line_width_ratio: f64,

    /// Tessellation vertices are pulled in to this distance from their site
    pub max_distance: f64,

    pub nearest_lookup: NearestLookup,
}

impl TerritoryStyle {
    /// Style from the map-settings multipliers players adjust
    ///
    /// `cell_size = 5 × grid_size`, `territory_radius = 20 × territory_size`,
    /// `line_width_ratio = border_width / 16`.
    pub fn from_map_settings(grid_size: f64, territory_size: f64, border_width: f64) -> Self {
        Self {
            mode: TerritoryMode::Grid,
            cell_size: 5.0 * grid_size,
            territory_radius: 20.0 * territory_size,
            line_width_ratio: border_width / 16.0,
            max_distance: DEFAULT_MAX_DISTANCE,
            nearest_lookup: NearestLookup::default(),
        }
    }

    /// Border stroke width in map units
    #[inline]
    pub fn line_width(&self) -> f64 {
        self.cell_size * self.line_width_ratio
    }

    /// Offset of contour crossings from the cell edge midpoint, in unit-cell space
    #[inline]
    pub fn line_offset(&self) -> f64 {
        self.line_width_ratio / 2.0
    }

    /// Check the fields the selected mode depends on
    pub fn validate(&self) -> Result<()> {
        match self.mode {
            TerritoryMode::Grid => {
                require_positive("cell size", self.cell_size)?;
                require_positive("territory radius", self.territory_radius)?;
                require_positive("line width ratio", self.line_width_ratio)?;
                if self.line_width_ratio >= 1.0 {
                    return Err(TerritoryError::InvalidConfig(format!(
                        "line width ratio must be below 1 (got {})",
                        self.line_width_ratio
                    )));
                }
                Ok(())
            }
            TerritoryMode::Tessellation => require_positive("max distance", self.max_distance),
        }
    }
}

impl Default for TerritoryStyle {
    fn default() -> Self {
        Self::from_map_settings(1.0, 1.0, 1.0)
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TerritoryError::InvalidConfig(format!(
            "{} must be positive (got {})",
            name, value
        )))
    }
}

/// Builder for [`TerritoryStyle`] with validation
///
/// # Example
///
/// ```rust
/// use territory_contours::*;
///
/// let style = TerritoryStyleBuilder::new()
///     .mode(TerritoryMode::Tessellation)
///     .max_distance(150.0)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(style.max_distance, 150.0);
/// ```
#[derive(Debug, Clone)]
pub struct TerritoryStyleBuilder {
    style: TerritoryStyle,
}

impl TerritoryStyleBuilder {
    /// Create a builder with the default map settings
    ///
    /// Defaults:
    /// - mode: Grid
    /// - cell_size: 5
    /// - territory_radius: 20
    /// - line_width_ratio: 1/16
    /// - max_distance: 200
    /// - nearest_lookup: LinearScan
    pub fn new() -> Self {
        Self {
            style: TerritoryStyle::default(),
        }
    }

    pub fn mode(mut self, mode: TerritoryMode) -> Self {
        self.style.mode = mode;
        self
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if `size` is not a positive finite number
    pub fn cell_size(mut self, size: f64) -> Result<Self> {
        require_positive("cell size", size)?;
        self.style.cell_size = size;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if `radius` is not a positive finite number
    pub fn territory_radius(mut self, radius: f64) -> Result<Self> {
        require_positive("territory radius", radius)?;
        self.style.territory_radius = radius;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` unless `0 < ratio < 1`
    pub fn line_width_ratio(mut self, ratio: f64) -> Result<Self> {
        require_positive("line width ratio", ratio)?;
        if ratio >= 1.0 {
            return Err(TerritoryError::InvalidConfig(format!(
                "line width ratio must be below 1 (got {})",
                ratio
            )));
        }
        self.style.line_width_ratio = ratio;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if `distance` is not a positive finite number
    pub fn max_distance(mut self, distance: f64) -> Result<Self> {
        require_positive("max distance", distance)?;
        self.style.max_distance = distance;
        Ok(self)
    }

    pub fn nearest_lookup(mut self, lookup: NearestLookup) -> Self {
        self.style.nearest_lookup = lookup;
        self
    }

    pub fn build(self) -> Result<TerritoryStyle> {
        self.style.validate()?;
        Ok(self.style)
    }
}

impl Default for TerritoryStyleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = TerritoryStyle::default();
        assert_eq!(style.mode, TerritoryMode::Grid);
        assert_eq!(style.cell_size, 5.0);
        assert_eq!(style.territory_radius, 20.0);
        assert_eq!(style.line_width_ratio, 1.0 / 16.0);
        assert_eq!(style.max_distance, DEFAULT_MAX_DISTANCE);
        assert_eq!(style.nearest_lookup, NearestLookup::LinearScan);
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_map_settings_scaling() {
        let style = TerritoryStyle::from_map_settings(2.0, 3.0, 4.0);
        assert_eq!(style.cell_size, 10.0);
        assert_eq!(style.territory_radius, 60.0);
        assert_eq!(style.line_width_ratio, 0.25);
        assert_eq!(style.line_width(), 2.5);
        assert_eq!(style.line_offset(), 0.125);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("grid".parse::<TerritoryMode>().unwrap(), TerritoryMode::Grid);
        assert_eq!("marching-square".parse::<TerritoryMode>().unwrap(), TerritoryMode::Grid);
        assert_eq!(
            "tessellation".parse::<TerritoryMode>().unwrap(),
            TerritoryMode::Tessellation
        );
        assert_eq!("voronoi".parse::<TerritoryMode>().unwrap(), TerritoryMode::Tessellation);

        let err = "hexes".parse::<TerritoryMode>().unwrap_err();
        assert!(matches!(err, TerritoryError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_grid_fields() {
        let mut style = TerritoryStyle::default();
        style.cell_size = 0.0;
        assert!(style.validate().is_err());

        let mut style = TerritoryStyle::default();
        style.territory_radius = -1.0;
        assert!(style.validate().is_err());

        let mut style = TerritoryStyle::default();
        style.line_width_ratio = 1.5;
        assert!(style.validate().is_err());

        let mut style = TerritoryStyle::default();
        style.cell_size = f64::NAN;
        assert!(style.validate().is_err());
    }

    #[test]
    fn test_validate_only_checks_active_mode() {
        let mut style = TerritoryStyle::default();
        style.max_distance = 0.0;
        assert!(style.validate().is_ok());

        style.mode = TerritoryMode::Tessellation;
        assert!(style.validate().is_err());

        style.max_distance = 10.0;
        style.cell_size = -3.0;
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_builder_custom() {
        let style = TerritoryStyleBuilder::new()
            .cell_size(10.0)
            .unwrap()
            .territory_radius(60.0)
            .unwrap()
            .line_width_ratio(0.125)
            .unwrap()
            .nearest_lookup(NearestLookup::KdTree)
            .build()
            .unwrap();

        assert_eq!(style.cell_size, 10.0);
        assert_eq!(style.territory_radius, 60.0);
        assert_eq!(style.line_width_ratio, 0.125);
        assert_eq!(style.nearest_lookup, NearestLookup::KdTree);
    }

    #[test]
    fn test_builder_rejects_invalid_values() {
        assert!(TerritoryStyleBuilder::new().cell_size(0.0).is_err());
        assert!(TerritoryStyleBuilder::new().territory_radius(-5.0).is_err());
        assert!(TerritoryStyleBuilder::new().line_width_ratio(2.0).is_err());
        assert!(TerritoryStyleBuilder::new().line_width_ratio(1.0).is_err());
        assert!(TerritoryStyleBuilder::new().line_width_ratio(0.999).is_ok());
        assert!(TerritoryStyleBuilder::new().max_distance(f64::INFINITY).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_style_serialization() {
        let style = TerritoryStyleBuilder::new()
            .mode(TerritoryMode::Tessellation)
            .build()
            .unwrap();

        let json = serde_json::to_string(&style).unwrap();
        assert!(json.contains("\"tessellation\""));
        let restored: TerritoryStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(style, restored);
    }
}
