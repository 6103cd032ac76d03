use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlDocument;

use super::js::{call, js_err};
use crate::render::Renderer;

/// Renderer over an xterm.js-compatible `Terminal` object.
pub struct XtermRenderer {
    term: JsValue,
}

impl XtermRenderer {
    pub fn new(term: JsValue) -> Self {
        Self { term }
    }

    fn invoke(&self, name: &str, args: &[JsValue]) {
        if let Err(e) = call(&self.term, name, args) {
            tracing::warn!(method = name, error = %js_err(e), "terminal call failed");
        }
    }
}

impl Renderer for XtermRenderer {
    fn write(&mut self, text: &str) {
        self.invoke("write", &[JsValue::from_str(text)]);
    }

    fn scroll_pages(&mut self, pages: i32) {
        self.invoke("scrollPages", &[JsValue::from(pages)]);
    }

    fn focus(&mut self) {
        self.invoke("focus", &[]);
    }

    fn copy_selection(&mut self) -> bool {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
            .and_then(|d| d.exec_command("copy").ok())
            .unwrap_or(false)
    }
}
