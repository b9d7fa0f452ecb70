use crate::cell::{claim_for, claimed_rect, rendered_rect, retarget_due, step_spans, Cell};
use crate::config::{draw_ms, GridConfig};
use crate::layout;

/// The tiling: dimensions plus cells in discovery order.
///
/// Cells only ever grow into tracks no other cell has claimed, so drawn
/// rectangles stay pairwise disjoint and inside the bounds while animating.
#[derive(Debug, Clone)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn generate(
        columns: u32,
        rows: u32,
        config: &GridConfig,
        rng: &mut fastrand::Rng,
        now_ms: f64,
    ) -> Self {
        Self {
            columns,
            rows,
            cells: layout::generate(columns, rows, config, rng, now_ms),
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Replaces every cell with a fresh layout when the dimensions change.
    /// Returns whether a new layout was generated.
    pub fn resize(
        &mut self,
        columns: u32,
        rows: u32,
        config: &GridConfig,
        rng: &mut fastrand::Rng,
        now_ms: f64,
    ) -> bool {
        if columns == self.columns && rows == self.rows {
            return false;
        }
        *self = Self::generate(columns, rows, config, rng, now_ms);
        true
    }

    /// One frame of span motion: interpolate every cell, then re-target the
    /// ones whose timer ran out.
    pub fn advance(&mut self, config: &GridConfig, rng: &mut fastrand::Rng, now_ms: f64) {
        for i in 0..self.cells.len() {
            step_spans(&mut self.cells[i], config.lerp_rate);
            if retarget_due(&self.cells[i], now_ms) {
                self.retarget(i, config, rng, now_ms);
            }
        }
    }

    /// Draws new target spans for `index` among those whose claim stays clear
    /// of every other cell's claim, and re-arms its timer.
    pub fn retarget(
        &mut self,
        index: usize,
        config: &GridConfig,
        rng: &mut fastrand::Rng,
        now_ms: f64,
    ) {
        let cell = &self.cells[index];
        let mut options = Vec::with_capacity((cell.max_col_span * cell.max_row_span) as usize);
        for cols in 1..=cell.max_col_span {
            for rows in 1..=cell.max_row_span {
                let claim = claim_for(cell, cols, rows);
                let clear = claim.fits_within(self.columns, self.rows)
                    && self
                        .cells
                        .iter()
                        .enumerate()
                        .all(|(j, other)| j == index || !claimed_rect(other).intersects(&claim));
                if clear {
                    options.push((cols, rows));
                }
            }
        }

        let cell = &mut self.cells[index];
        if let Some((cols, rows)) = rng.choice(options) {
            cell.target_col_span = cols;
            cell.target_row_span = rows;
        }
        cell.last_retarget_ms = now_ms;
        cell.retarget_interval_ms = draw_ms(rng, &config.retarget_ms);
    }

    /// First pair of cells whose drawn rectangles intersect, if any.
    pub fn first_overlap(&self) -> Option<(usize, usize)> {
        let rects: Vec<_> = self.cells.iter().map(rendered_rect).collect();
        for (i, a) in rects.iter().enumerate() {
            for (j, b) in rects.iter().enumerate().skip(i + 1) {
                if a.intersects(b) {
                    return Some((i, j));
                }
            }
        }
        None
    }

    /// Whether every drawn rectangle lies inside the grid.
    pub fn in_bounds(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| rendered_rect(cell).fits_within(self.columns, self.rows))
    }
}
