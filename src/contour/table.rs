//! The 16-case contour lookup table
//!
//! Rows are indexed by the corner pattern of a cell, built with the weights
//! top-left = 8, top-right = 4, bottom-left = 1, bottom-right = 2. The row data
//! is authored against exactly this weighting; it is not the usual
//! clockwise marching-squares order.
//!
//! Coordinates live in unit-cell space: `(0, 0)` is the cell's top-left grid
//! vertex and `y` grows towards the next row. Edge crossings sit half a line
//! width either side of the edge midpoint so that neighbouring factions' border
//! strokes do not overlap.

use glam::DVec2;

/// Pattern of a fully owned cell
pub const FULL_PATTERN: u8 = 15;

pub const TOP_LEFT_WEIGHT: u8 = 8;
pub const TOP_RIGHT_WEIGHT: u8 = 4;
pub const BOTTOM_LEFT_WEIGHT: u8 = 1;
pub const BOTTOM_RIGHT_WEIGHT: u8 = 2;

/// What the tracer does with a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseAction {
    /// No corner owned
    Skip,
    /// Emit the row's fill polygon on its own
    New,
    /// Fully owned: extend or start a merged run
    Combine,
}

/// One unit-cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitCoord {
    Zero,
    One,
    /// Half a line width before the midpoint
    Low,
    /// Half a line width past the midpoint
    High,
}

impl UnitCoord {
    #[inline]
    pub fn resolve(self, line_offset: f64) -> f64 {
        match self {
            UnitCoord::Zero => 0.0,
            UnitCoord::One => 1.0,
            UnitCoord::Low => 0.5 - line_offset,
            UnitCoord::High => 0.5 + line_offset,
        }
    }
}

/// Symbolic point in unit-cell space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitPoint(pub UnitCoord, pub UnitCoord);

impl UnitPoint {
    #[inline]
    pub fn resolve(self, line_offset: f64) -> DVec2 {
        DVec2::new(self.0.resolve(line_offset), self.1.resolve(line_offset))
    }
}

/// A table row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseRow {
    pub action: CaseAction,
    /// Border segment endpoints, taken pairwise (0, 2 or 4 points)
    pub border: &'static [UnitPoint],
    /// Fill polygon in drawing order
    pub fill: &'static [UnitPoint],
}

use UnitCoord::{High as H, Low as L, One as O, Zero as Z};
use UnitPoint as P;

const fn new_row(border: &'static [UnitPoint], fill: &'static [UnitPoint]) -> CaseRow {
    CaseRow {
        action: CaseAction::New,
        border,
        fill,
    }
}

/// All 16 cases
pub const CASES: [CaseRow; 16] = [
    // 0: nothing owned
    CaseRow {
        action: CaseAction::Skip,
        border: &[],
        fill: &[],
    },
    // 1: bottom-left
    new_row(&[P(Z, H), P(L, O)], &[P(Z, H), P(L, O), P(Z, O)]),
    // 2: bottom-right
    new_row(&[P(O, H), P(H, O)], &[P(O, H), P(H, O), P(O, O)]),
    // 3: bottom row
    new_row(&[P(O, H), P(Z, H)], &[P(O, H), P(Z, H), P(Z, O), P(O, O)]),
    // 4: top-right
    new_row(&[P(H, Z), P(O, L)], &[P(H, Z), P(O, L), P(O, Z)]),
    // 5: top-right and bottom-left (saddle)
    new_row(
        &[P(H, Z), P(Z, H), P(O, L), P(L, O)],
        &[P(H, Z), P(Z, H), P(Z, O), P(L, O), P(O, L), P(O, Z)],
    ),
    // 6: right column
    new_row(&[P(H, Z), P(H, O)], &[P(H, Z), P(H, O), P(O, O), P(O, Z)]),
    // 7: all but top-left
    new_row(&[P(H, Z), P(Z, H)], &[P(H, Z), P(Z, H), P(Z, O), P(O, O), P(O, Z)]),
    // 8: top-left
    new_row(&[P(L, Z), P(Z, L)], &[P(L, Z), P(Z, L), P(Z, Z)]),
    // 9: left column
    new_row(&[P(L, Z), P(L, O)], &[P(L, Z), P(L, O), P(Z, O), P(Z, Z)]),
    // 10: top-left and bottom-right (saddle)
    new_row(
        &[P(L, Z), P(O, H), P(Z, L), P(H, O)],
        &[P(L, Z), P(O, H), P(O, O), P(H, O), P(Z, L), P(Z, Z)],
    ),
    // 11: all but top-right
    new_row(&[P(L, Z), P(O, H)], &[P(L, Z), P(O, H), P(O, O), P(Z, O), P(Z, Z)]),
    // 12: top row
    new_row(&[P(Z, L), P(O, L)], &[P(Z, L), P(O, L), P(O, Z), P(Z, Z)]),
    // 13: all but bottom-right
    new_row(&[P(O, L), P(L, O)], &[P(O, L), P(L, O), P(Z, O), P(Z, Z), P(O, Z)]),
    // 14: all but bottom-left
    new_row(&[P(Z, L), P(H, O)], &[P(Z, L), P(H, O), P(O, O), P(O, Z), P(Z, Z)]),
    // 15: everything owned
    CaseRow {
        action: CaseAction::Combine,
        border: &[],
        fill: &[P(Z, Z), P(O, Z), P(O, O), P(Z, O)],
    },
];

/// Pattern index from the four corner tests
#[inline]
pub fn pattern_from_corners(top_left: bool, top_right: bool, bottom_left: bool, bottom_right: bool) -> u8 {
    (top_left as u8) * TOP_LEFT_WEIGHT
        + (top_right as u8) * TOP_RIGHT_WEIGHT
        + (bottom_left as u8) * BOTTOM_LEFT_WEIGHT
        + (bottom_right as u8) * BOTTOM_RIGHT_WEIGHT
}

/// [`CASES`] resolved against one line offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourTable {
    line_offset: f64,
}

impl ContourTable {
    /// `line_offset` is in unit-cell space, half the line-width ratio
    pub fn new(line_offset: f64) -> Self {
        Self { line_offset }
    }

    #[inline]
    pub fn line_offset(&self) -> f64 {
        self.line_offset
    }

    /// Row for `pattern` (only the low four bits are used)
    #[inline]
    pub fn row(&self, pattern: u8) -> &'static CaseRow {
        &CASES[(pattern & 0x0f) as usize]
    }

    /// Border segments of `pattern` in unit-cell space
    pub fn border_segments(&self, pattern: u8) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.row(pattern)
            .border
            .chunks_exact(2)
            .map(move |pair| (pair[0].resolve(self.line_offset), pair[1].resolve(self.line_offset)))
    }

    /// Fill polygon of `pattern` in unit-cell space
    pub fn fill(&self, pattern: u8) -> impl Iterator<Item = DVec2> + '_ {
        self.row(pattern)
            .fill
            .iter()
            .map(move |point| point.resolve(self.line_offset))
    }

    /// Resolved `index`th fill vertex of the full-cell row
    pub fn full_cell_vertex(&self, index: usize) -> DVec2 {
        CASES[FULL_PATTERN as usize].fill[index].resolve(self.line_offset)
    }
}
