//! Error type shared by the grid and its browser bindings.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("document has no body")]
    NoBody,

    #[error("DOM operation `{op}` failed: {detail}")]
    Dom { op: &'static str, detail: String },

    #[error("could not schedule animation frame: {0}")]
    Schedule(String),
}

impl GridError {
    /// Wraps a rejected browser call; `detail` is the debug rendering of the thrown value.
    pub fn dom(op: &'static str, err: &JsValue) -> Self {
        Self::Dom {
            op,
            detail: format!("{err:?}"),
        }
    }
}

impl From<GridError> for JsValue {
    fn from(err: GridError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T, E = GridError> = std::result::Result<T, E>;
