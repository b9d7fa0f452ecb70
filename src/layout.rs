//! Greedy first-fit tiling of a `columns × rows` grid.

use std::f64::consts::TAU;

use crate::cell::{Cell, Rect};
use crate::config::{draw_ms, GridConfig};

/// Row-major boolean matrix of covered tracks.
#[derive(Debug, Clone)]
pub struct Occupancy {
    columns: u32,
    rows: u32,
    taken: Vec<bool>,
}

impl Occupancy {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            taken: vec![false; columns as usize * rows as usize],
        }
    }

    fn index(&self, col: u32, row: u32) -> usize {
        row as usize * self.columns as usize + col as usize
    }

    pub fn is_taken(&self, col: u32, row: u32) -> bool {
        col >= self.columns || row >= self.rows || self.taken[self.index(col, row)]
    }

    /// First uncovered position in row-major order, as `(col, row)`.
    pub fn first_free(&self) -> Option<(u32, u32)> {
        let i = self.taken.iter().position(|taken| !taken)?;
        let columns = self.columns as usize;
        Some(((i % columns) as u32, (i / columns) as u32))
    }

    pub fn mark(&mut self, rect: Rect) {
        for row in rect.row..rect.row_end().min(self.rows) {
            for col in rect.col..rect.col_end().min(self.columns) {
                let i = self.index(col, row);
                self.taken[i] = true;
            }
        }
    }

    /// Uncovered tracks to the right of `(col, row)`, inclusive, at most `limit`.
    fn free_run(&self, col: u32, row: u32, limit: u32) -> u32 {
        (0..limit)
            .take_while(|&dc| !self.is_taken(col + dc, row))
            .count() as u32
    }

    /// Uncovered rows of width `cols` starting at `row`, at most `limit`.
    fn free_rows(&self, col: u32, row: u32, cols: u32, limit: u32) -> u32 {
        (0..limit)
            .take_while(|&dr| self.free_run(col, row + dr, cols) == cols)
            .count() as u32
    }

    pub fn is_full(&self) -> bool {
        self.taken.iter().all(|&taken| taken)
    }
}

/// Tiles the grid with non-overlapping cells, in anchor discovery order.
///
/// Each anchor is the first uncovered position; its spans are drawn uniformly
/// from the part of `[1, min(edge distance, max_span)]` that is still free.
/// `now_ms` starts every cell's re-target timer.
pub fn generate(
    columns: u32,
    rows: u32,
    config: &GridConfig,
    rng: &mut fastrand::Rng,
    now_ms: f64,
) -> Vec<Cell> {
    let cap = config.max_span.max(1);
    let mut occupancy = Occupancy::new(columns, rows);
    let mut cells = Vec::new();

    // Upper bound only; the scan runs out of free anchors first.
    let max_iterations = columns as usize * rows as usize;
    for _ in 0..max_iterations {
        let Some((col, row)) = occupancy.first_free() else {
            break;
        };

        let max_col_span = (columns - col).min(cap);
        let max_row_span = (rows - row).min(cap);

        let col_span = rng.u32(1..=occupancy.free_run(col, row, max_col_span));
        let row_span = rng.u32(1..=occupancy.free_rows(col, row, col_span, max_row_span));

        let rect = Rect::new(col, row, col_span, row_span);
        occupancy.mark(rect);

        let phase = rng.f64() * TAU;
        let interval = draw_ms(rng, &config.initial_retarget_ms);
        cells.push(Cell::new(rect, max_col_span, max_row_span, phase).with_timer(now_ms, interval));
    }

    cells
}
