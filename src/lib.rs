//! Animated tiling used as a page background.
//!
//! The layout and animation logic is plain Rust and runs anywhere; the
//! browser bindings in the `wasm` module only build for `wasm32`.

pub mod cell;
pub mod config;
pub mod controller;
pub mod error;
pub mod grid;
pub mod layout;

pub use cell::{Appearance, Cell, Placement, Rect};
pub use config::GridConfig;
pub use controller::{Controller, FrameId, FrameScheduler, LoopState, Surface};
pub use error::GridError;
pub use grid::Grid;

// Only compile browser-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    mod frame;
    mod logger;
    mod render;

    pub use frame::{mount, GridHandle, RafScheduler};
    pub use render::DomSurface;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        logger::init();
        mount()?;
        Ok(())
    }
}
