//! WASM bindings for browser-hosted games.
//!
//! The host passes its catalog document as a JSON string and measures text
//! through a JavaScript callback `(text) => width`.

use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::book::Catalog;
use crate::library::Librarium;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// A catalog and its reading session, owned by JavaScript.
#[wasm_bindgen]
pub struct WasmLibrarium {
    inner: Librarium,
}

#[wasm_bindgen]
impl WasmLibrarium {
    /// Parse a catalog document.
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: &str) -> Result<WasmLibrarium, JsValue> {
        let catalog = Catalog::from_json_str(catalog_json).map_err(to_js)?;
        Ok(Self {
            inner: Librarium::new(catalog),
        })
    }

    #[wasm_bindgen(js_name = openReading)]
    pub fn open_reading(&mut self, title: &str) -> Result<(), JsValue> {
        self.inner.open_reading(title).map_err(to_js)
    }

    #[wasm_bindgen(js_name = closeReading)]
    pub fn close_reading(&mut self) {
        self.inner.close_reading();
    }

    #[wasm_bindgen(js_name = getBookContents)]
    pub fn get_book_contents(&self, title: &str) -> Result<String, JsValue> {
        self.inner.get_book_contents(title).map_err(to_js)
    }

    #[wasm_bindgen(js_name = nextPage)]
    pub fn next_page(&mut self) -> Result<bool, JsValue> {
        self.inner.next_page().map_err(to_js)
    }

    #[wasm_bindgen(js_name = prevPage)]
    pub fn prev_page(&mut self) -> Result<bool, JsValue> {
        self.inner.prev_page().map_err(to_js)
    }

    #[wasm_bindgen(js_name = currentPageNumber)]
    pub fn current_page_number(&self) -> Result<usize, JsValue> {
        self.inner.current_page_number().map_err(to_js)
    }

    #[wasm_bindgen(js_name = totalPages)]
    pub fn total_pages(&self) -> Result<usize, JsValue> {
        self.inner.total_pages().map_err(to_js)
    }

    /// Lay out the current page and return the layout as JSON.
    ///
    /// `measure` is called with each text fragment and must return its
    /// width; anything that is not a number counts as zero.
    #[wasm_bindgen(js_name = getCurrentPageLayout)]
    pub fn get_current_page_layout(
        &self,
        measure: &Function,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Result<String, JsValue> {
        let measure = |text: &str| {
            measure
                .call1(&JsValue::NULL, &JsValue::from_str(text))
                .ok()
                .and_then(|width| width.as_f64())
                .unwrap_or(0.0) as f32
        };
        let layout = self
            .inner
            .get_current_page_layout(&measure, viewport_width, viewport_height)
            .map_err(to_js)?;
        serde_json::to_string(&layout).map_err(to_js)
    }
}
