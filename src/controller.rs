//! Frame loop state machine for the background grid.
//!
//! The controller owns all mutable state. Whoever drives it (the browser glue
//! in `wasm`, or a test) calls [`Controller::on_frame`] when a requested frame
//! fires and [`Controller::set_visible`] when page visibility changes. Both
//! run on one thread and never overlap.

use log::{debug, warn};

use crate::cell::{appearance, placement, Appearance, Placement};
use crate::config::GridConfig;
use crate::error::Result;
use crate::grid::Grid;

/// Handle returned by the host when a frame is requested.
pub type FrameId = i32;

/// Host facility that runs a callback at the next display refresh.
pub trait FrameScheduler {
    fn request(&mut self) -> Result<FrameId>;
    fn cancel(&mut self, id: FrameId);
}

/// Where tiles are drawn.
pub trait Surface {
    /// Drops every existing tile and creates one per cell of `grid` in a
    /// single batched insert, sizing the tracks to the grid.
    fn rebuild(&mut self, grid: &Grid, config: &GridConfig) -> Result<()>;

    /// Updates tile `index` for the current frame.
    fn paint(&mut self, index: usize, placement: &Placement, look: &Appearance) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// A frame is pending under this id.
    Running(FrameId),
    /// Page hidden, or the loop has not started yet.
    Paused,
}

pub struct Controller<S, F> {
    config: GridConfig,
    grid: Grid,
    rng: fastrand::Rng,
    surface: S,
    scheduler: F,
    state: LoopState,
    surface_stale: bool,
}

impl<S: Surface, F: FrameScheduler> Controller<S, F> {
    /// Lays out the initial grid and builds the surface. The loop stays
    /// paused until the page is reported visible.
    pub fn new(
        config: GridConfig,
        mut surface: S,
        scheduler: F,
        mut rng: fastrand::Rng,
        now_ms: f64,
    ) -> Result<Self> {
        let grid = Grid::generate(
            config.initial_columns,
            config.initial_rows,
            &config,
            &mut rng,
            now_ms,
        );
        surface.rebuild(&grid, &config)?;
        Ok(Self {
            config,
            grid,
            rng,
            surface,
            scheduler,
            state: LoopState::Paused,
            surface_stale: false,
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    /// Called when a requested frame fires.
    pub fn on_frame(&mut self, now_ms: f64) {
        match self.state {
            LoopState::Running(_) => self.run_frame(now_ms),
            // A callback that raced a cancel; the chain is already stopped.
            LoopState::Paused => {}
        }
    }

    /// Hidden: cancel the pending frame. Visible again: run one frame right
    /// away, which re-arms the chain. Repeated events in the same direction
    /// do nothing, so at most one chain is ever live.
    pub fn set_visible(&mut self, visible: bool, now_ms: f64) {
        match (visible, self.state) {
            (false, LoopState::Running(id)) => {
                self.scheduler.cancel(id);
                self.state = LoopState::Paused;
                debug!("background grid paused");
            }
            (true, LoopState::Paused) => {
                debug!("background grid resumed");
                self.run_frame(now_ms);
            }
            _ => {}
        }
    }

    fn run_frame(&mut self, now_ms: f64) {
        if let Err(err) = self.render(now_ms) {
            warn!("background grid frame failed: {err}");
        }
        self.rearm();
    }

    fn rearm(&mut self) {
        self.state = match self.scheduler.request() {
            Ok(id) => LoopState::Running(id),
            Err(err) => {
                warn!("background grid stopped: {err}");
                LoopState::Paused
            }
        };
    }

    /// Animates every cell, then maybe reshuffles the grid dimensions.
    ///
    /// A paint failure does not stop the reshuffle step; the first error is
    /// returned after both ran.
    fn render(&mut self, now_ms: f64) -> Result<()> {
        self.grid.advance(&self.config, &mut self.rng, now_ms);

        // Tiles no longer match the cells until a rebuild succeeds.
        let painted = if self.surface_stale {
            Ok(())
        } else {
            self.paint_all(now_ms)
        };
        let reshuffled = self.maybe_reshuffle(now_ms).map(|_| ());
        painted.and(reshuffled)
    }

    fn paint_all(&mut self, now_ms: f64) -> Result<()> {
        let time = now_ms * self.config.time_scale;
        for (i, cell) in self.grid.cells().iter().enumerate() {
            let look = appearance(time, cell.phase, cell.start_col, cell.start_row);
            self.surface.paint(i, &placement(cell), &look)?;
        }
        Ok(())
    }

    /// With the configured per-frame probability, draws new dimensions and
    /// regenerates the grid if they differ. A surface left stale by a failed
    /// rebuild is rebuilt on every frame until it succeeds. Returns whether
    /// the surface was rebuilt.
    fn maybe_reshuffle(&mut self, now_ms: f64) -> Result<bool> {
        let resized = self.rng.f64() < self.config.reshuffle_probability && {
            let columns = self.rng.u32(self.config.dimension_range.clone());
            let rows = self.rng.u32(self.config.dimension_range.clone());
            self.grid
                .resize(columns, rows, &self.config, &mut self.rng, now_ms)
        };
        if resized {
            debug!(
                "background grid regenerated at {}x{} with {} cells",
                self.grid.columns(),
                self.grid.rows(),
                self.grid.cells().len()
            );
        } else if !self.surface_stale {
            return Ok(false);
        }

        self.surface_stale = true;
        self.surface.rebuild(&self.grid, &self.config)?;
        self.surface_stale = false;
        Ok(true)
    }
}
