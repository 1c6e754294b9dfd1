//! Contour tracing: turns a classified grid into fills and border strokes
//!
//! Cells are scanned column by column (`ix` outer, `iy` inner). Partially
//! owned cells emit their table polygon directly. Runs of fully owned cells
//! down a column are merged into one rectangle instead of one square per cell.
//!
//! A run is closed as soon as the scan leaves it: on the first cell below it
//! that is not fully owned, or at the end of the column. The closing edge is
//! the bottom edge of the last full cell, which is the top edge of the cell
//! that ended the run.

use glam::DVec2;

use super::grid::Grid;
use super::table::{pattern_from_corners, CaseAction, ContourTable};
use crate::config::TerritoryStyle;
use crate::shapes::{FillPolygon, FillStyle, LineCap, LineSegment, StrokeStyle, TerritoryShapes};
use crate::site::Faction;

/// Fill alpha of grid-mode polygons
pub const GRID_FILL_ALPHA: f32 = 0.333;

/// Alpha of grid-mode border strokes
pub const GRID_STROKE_ALPHA: f32 = 1.0;

/// Corner pattern of cell `(ix, iy)` for the faction at `faction_index`
pub fn cell_pattern(grid: &Grid, faction_index: usize, ix: usize, iy: usize) -> u8 {
    let owns = |x: usize, y: usize| grid.owner_at(x, y) == Some(faction_index);
    pattern_from_corners(
        owns(ix, iy),
        owns(ix + 1, iy),
        owns(ix, iy + 1),
        owns(ix + 1, iy + 1),
    )
}

/// Scan state for merging full cells
#[derive(Debug, Clone, PartialEq)]
enum RunState {
    Idle,
    Accumulating {
        /// Vertices emitted so far (top edge of the first full cell)
        polygon: Vec<DVec2>,
        /// Origin of the most recent full cell in the run
        last_origin: DVec2,
    },
}

struct FactionTracer<'a> {
    table: &'a ContourTable,
    cell_size: f64,
    fill: FillStyle,
    stroke: StrokeStyle,
    shapes: TerritoryShapes,
    run: RunState,
}

impl<'a> FactionTracer<'a> {
    fn to_absolute(&self, unit: DVec2, origin: DVec2) -> DVec2 {
        unit * self.cell_size + origin
    }

    fn visit(&mut self, pattern: u8, origin: DVec2) {
        let table = self.table;
        let action = table.row(pattern).action;

        if action != CaseAction::Combine {
            self.close_run();
        }

        for (start, end) in table.border_segments(pattern) {
            let segment = LineSegment {
                start: self.to_absolute(start, origin),
                end: self.to_absolute(end, origin),
                stroke: self.stroke,
            };
            self.shapes.segments.push(segment);
        }

        match action {
            CaseAction::Skip => {}
            CaseAction::New => {
                let vertices: Vec<DVec2> = table
                    .fill(pattern)
                    .map(|unit| self.to_absolute(unit, origin))
                    .collect();
                self.push_polygon(vertices);
            }
            CaseAction::Combine => {
                if let RunState::Accumulating { last_origin, .. } = &mut self.run {
                    *last_origin = origin;
                } else {
                    let polygon = vec![
                        self.to_absolute(table.full_cell_vertex(0), origin),
                        self.to_absolute(table.full_cell_vertex(1), origin),
                    ];
                    self.run = RunState::Accumulating {
                        polygon,
                        last_origin: origin,
                    };
                }
            }
        }
    }

    /// Finish an open run with the bottom edge of its last full cell
    fn close_run(&mut self) {
        if let RunState::Accumulating {
            mut polygon,
            last_origin,
        } = std::mem::replace(&mut self.run, RunState::Idle)
        {
            polygon.push(self.to_absolute(self.table.full_cell_vertex(2), last_origin));
            polygon.push(self.to_absolute(self.table.full_cell_vertex(3), last_origin));
            self.push_polygon(polygon);
        }
    }

    fn push_polygon(&mut self, vertices: Vec<DVec2>) {
        self.shapes.polygons.push(FillPolygon {
            vertices,
            fill: self.fill,
            outline: None,
        });
    }
}

/// Trace one faction over the whole grid
pub fn trace_faction(
    grid: &Grid,
    table: &ContourTable,
    faction_index: usize,
    faction: &Faction,
    style: &TerritoryStyle,
) -> TerritoryShapes {
    let mut tracer = FactionTracer {
        table,
        cell_size: grid.cell_size(),
        fill: FillStyle {
            color: faction.color,
            alpha: GRID_FILL_ALPHA,
        },
        stroke: StrokeStyle {
            color: faction.color,
            alpha: GRID_STROKE_ALPHA,
            width: style.line_width(),
            cap: LineCap::Round,
        },
        shapes: TerritoryShapes::new(Some(faction.id)),
        run: RunState::Idle,
    };

    if grid.is_empty() {
        return tracer.shapes;
    }

    for ix in 0..grid.width() {
        for iy in 0..grid.height() {
            let pattern = cell_pattern(grid, faction_index, ix, iy);
            tracer.visit(pattern, grid.cell_origin(ix, iy));
        }
        tracer.close_run();
    }

    log::trace!(
        "faction {:?}: {} polygons, {} border segments",
        faction.id,
        tracer.shapes.polygons.len(),
        tracer.shapes.segments.len()
    );

    tracer.shapes
}

/// Trace every faction, one layer each in faction order
pub fn trace(grid: &Grid, factions: &[Faction], style: &TerritoryStyle) -> Vec<TerritoryShapes> {
    let table = ContourTable::new(style.line_offset());

    factions
        .iter()
        .enumerate()
        .map(|(index, faction)| trace_faction(grid, &table, index, faction, style))
        .collect()
}
