//! A single tile of the background grid and the per-frame math applied to it.

/// Alpha of every tile's background; the pulse lives in `opacity`.
const BACKGROUND_ALPHA: f64 = 0.15;

/// Axis-aligned rectangle in grid tracks, anchored at its top-left track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub col: u32,
    pub row: u32,
    pub cols: u32,
    pub rows: u32,
}

impl Rect {
    pub const fn new(col: u32, row: u32, cols: u32, rows: u32) -> Self {
        Self { col, row, cols, rows }
    }

    pub const fn col_end(&self) -> u32 {
        self.col + self.cols
    }

    pub const fn row_end(&self) -> u32 {
        self.row + self.rows
    }

    pub const fn intersects(&self, other: &Rect) -> bool {
        self.col < other.col_end()
            && other.col < self.col_end()
            && self.row < other.row_end()
            && other.row < self.row_end()
    }

    pub const fn fits_within(&self, columns: u32, rows: u32) -> bool {
        self.col_end() <= columns && self.row_end() <= rows
    }
}

/// A tile anchored at `(start_col, start_row)` whose spans drift toward a
/// periodically re-chosen target.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub start_col: u32,
    pub start_row: u32,
    pub current_col_span: f64,
    pub current_row_span: f64,
    pub target_col_span: u32,
    pub target_row_span: u32,
    pub max_col_span: u32,
    pub max_row_span: u32,
    /// Radians in `[0, 2π)`, fixed at creation.
    pub phase: f64,
    pub last_retarget_ms: f64,
    pub retarget_interval_ms: f64,
}

impl Cell {
    /// A cell at rest: target equals the initial span.
    pub fn new(anchor: Rect, max_col_span: u32, max_row_span: u32, phase: f64) -> Self {
        Self {
            start_col: anchor.col,
            start_row: anchor.row,
            current_col_span: anchor.cols as f64,
            current_row_span: anchor.rows as f64,
            target_col_span: anchor.cols,
            target_row_span: anchor.rows,
            max_col_span,
            max_row_span,
            phase,
            last_retarget_ms: 0.0,
            retarget_interval_ms: 0.0,
        }
    }

    /// Arms the re-target timer.
    pub fn with_timer(mut self, now_ms: f64, interval_ms: f64) -> Self {
        self.last_retarget_ms = now_ms;
        self.retarget_interval_ms = interval_ms;
        self
    }
}

/// Moves both current spans `rate` of the way toward their targets.
///
/// Not scaled by frame time: the approach speed follows the display refresh rate.
pub fn step_spans(cell: &mut Cell, rate: f64) {
    cell.current_col_span += (cell.target_col_span as f64 - cell.current_col_span) * rate;
    cell.current_row_span += (cell.target_row_span as f64 - cell.current_row_span) * rate;
}

pub fn retarget_due(cell: &Cell, now_ms: f64) -> bool {
    now_ms - cell.last_retarget_ms > cell.retarget_interval_ms
}

/// Span as it is drawn: nearest whole track, never below one.
pub fn rendered_span(span: f64) -> u32 {
    span.round().max(1.0) as u32
}

/// The rectangle currently drawn on screen.
pub fn rendered_rect(cell: &Cell) -> Rect {
    Rect::new(
        cell.start_col,
        cell.start_row,
        rendered_span(cell.current_col_span),
        rendered_span(cell.current_row_span),
    )
}

/// Everything the cell may cover until it reaches its target.
///
/// Current spans move monotonically toward the target, so the drawn
/// rectangle never leaves this one.
pub fn claimed_rect(cell: &Cell) -> Rect {
    claim_for(cell, cell.target_col_span, cell.target_row_span)
}

/// The claim the cell would hold if it re-targeted to `(cols, rows)` now.
pub fn claim_for(cell: &Cell, cols: u32, rows: u32) -> Rect {
    let drawn = rendered_rect(cell);
    Rect::new(
        cell.start_col,
        cell.start_row,
        drawn.cols.max(cols),
        drawn.rows.max(rows),
    )
}

/// CSS grid placement values, one-based as CSS lines are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub column: String,
    pub row: String,
}

pub fn placement(cell: &Cell) -> Placement {
    let rect = rendered_rect(cell);
    Placement {
        column: format!("{} / span {}", rect.col + 1, rect.cols),
        row: format!("{} / span {}", rect.row + 1, rect.rows),
    }
}

/// Per-frame look of a tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub opacity: f64,
    /// Degrees in `[0, 360)`.
    pub hue: f64,
    /// Percent.
    pub saturation: f64,
    /// Percent.
    pub lightness: f64,
}

impl Appearance {
    pub fn background(&self) -> String {
        format!(
            "hsla({}, {}%, {}%, {})",
            self.hue, self.saturation, self.lightness, BACKGROUND_ALPHA
        )
    }

    pub fn opacity_css(&self) -> String {
        self.opacity.to_string()
    }
}

/// Pure function of scaled time, the cell's phase and its anchor.
pub fn appearance(time: f64, phase: f64, col: u32, row: u32) -> Appearance {
    let cell_time = time + phase;
    Appearance {
        opacity: 0.4 + 0.2 * (cell_time * 0.8).sin(),
        hue: (time * 10.0 + col as f64 * 30.0 + row as f64 * 20.0).rem_euclid(360.0),
        saturation: 15.0 + 10.0 * (cell_time * 0.5).sin(),
        lightness: 88.0 + 8.0 * (cell_time * 0.3).cos(),
    }
}
