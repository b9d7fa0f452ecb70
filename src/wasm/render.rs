use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, HtmlElement};

use crate::cell::{placement, Appearance, Cell, Placement};
use crate::config::GridConfig;
use crate::controller::Surface;
use crate::error::{GridError, Result};
use crate::grid::Grid;

/// Id of the container the grid draws into.
pub const CONTAINER_ID: &str = "background-grid";

/// Renders cells as `<div>` children of a CSS grid container.
pub struct DomSurface {
    document: Document,
    container: HtmlElement,
    tiles: Vec<HtmlElement>,
}

impl DomSurface {
    /// Uses `#background-grid` if the page already has one, otherwise
    /// appends a new one to `<body>`.
    pub fn mount(document: &Document) -> Result<Self> {
        let container = match document.get_element_by_id(CONTAINER_ID) {
            Some(existing) => existing
                .dyn_into::<HtmlElement>()
                .map_err(|el| GridError::dom("dyn_into HtmlElement", &el.into()))?,
            None => {
                let div = create_div(document)?;
                div.set_id(CONTAINER_ID);
                document
                    .body()
                    .ok_or(GridError::NoBody)?
                    .append_child(&div)
                    .map_err(|e| GridError::dom("append_child", &e))?;
                div
            }
        };
        Ok(Self::new(document.clone(), container))
    }

    /// Draws into `container`, which starts with no tiles.
    pub fn new(document: Document, container: HtmlElement) -> Self {
        Self {
            document,
            container,
            tiles: Vec::new(),
        }
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    pub fn tiles(&self) -> &[HtmlElement] {
        &self.tiles
    }

    fn create_tile(&self, cell: &Cell, config: &GridConfig) -> Result<HtmlElement> {
        let tile = create_div(&self.document)?;
        let style = tile.style();
        set(&style, "transition", config.transition)?;
        apply_placement(&style, &placement(cell))?;
        Ok(tile)
    }
}

impl Surface for DomSurface {
    fn rebuild(&mut self, grid: &Grid, config: &GridConfig) -> Result<()> {
        // Old tiles stay in place until the replacement set is fully built.
        let fragment = self.document.create_document_fragment();
        let mut tiles = Vec::with_capacity(grid.cells().len());
        for cell in grid.cells() {
            let tile = self.create_tile(cell, config)?;
            fragment
                .append_child(&tile)
                .map_err(|e| GridError::dom("append_child", &e))?;
            tiles.push(tile);
        }

        let style = self.container.style();
        set(&style, "grid-template-columns", &format!("repeat({}, 1fr)", grid.columns()))?;
        set(&style, "grid-template-rows", &format!("repeat({}, 1fr)", grid.rows()))?;
        self.container
            .append_child(&fragment)
            .map_err(|e| GridError::dom("append_child", &e))?;

        for old in std::mem::replace(&mut self.tiles, tiles) {
            old.remove();
        }
        Ok(())
    }

    fn paint(&mut self, index: usize, placement: &Placement, look: &Appearance) -> Result<()> {
        let tile = self.tiles.get(index).ok_or_else(|| GridError::Dom {
            op: "paint",
            detail: format!("no tile at index {index}"),
        })?;
        let style = tile.style();
        apply_placement(&style, placement)?;
        set(&style, "opacity", &look.opacity_css())?;
        set(&style, "background-color", &look.background())?;
        Ok(())
    }
}

fn create_div(document: &Document) -> Result<HtmlElement> {
    document
        .create_element("div")
        .map_err(|e| GridError::dom("create_element", &e))?
        .dyn_into::<HtmlElement>()
        .map_err(|el| GridError::dom("dyn_into HtmlElement", &el.into()))
}

fn apply_placement(style: &CssStyleDeclaration, placement: &Placement) -> Result<()> {
    set(style, "grid-column", &placement.column)?;
    set(style, "grid-row", &placement.row)
}

fn set(style: &CssStyleDeclaration, property: &'static str, value: &str) -> Result<()> {
    style
        .set_property(property, value)
        .map_err(|e| GridError::dom(property, &e))
}
