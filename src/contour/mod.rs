//! Grid-mode territories
//!
//! Samples site ownership onto a regular grid, then traces each faction's
//! region with a 16-case marching-squares table.

mod grid;
mod table;
mod tracer;

pub use grid::{grid_bounds, nearest_site, sample_grid, Grid};
pub use table::{
    pattern_from_corners, CaseAction, CaseRow, ContourTable, UnitCoord, UnitPoint, CASES,
    FULL_PATTERN,
};
pub use tracer::{cell_pattern, trace, trace_faction, GRID_FILL_ALPHA, GRID_STROKE_ALPHA};
