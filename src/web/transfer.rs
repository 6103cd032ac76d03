use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use futures::{channel::oneshot, future::LocalBoxFuture, FutureExt};
use js_sys::{Array, Uint8Array};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, HtmlInputElement, Response, Url};

use super::js::js_err;
use crate::commands::{HostTransfer, PickedFile};

// a picker closed without choosing fires focus but never change
const PICKER_CANCEL_GRACE_MS: i32 = 1000;

fn document() -> Result<Document, String> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document available".to_string())
}

fn defer(callback: JsValue, millis: i32) {
    if let Some(window) = web_sys::window() {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            millis,
        );
    }
}

/// Browser downloads through an object URL, `fetch` for uploads and a
/// hidden file input for local files.
#[derive(Default)]
pub struct BrowserTransfer {
    file_input: RefCell<Option<HtmlInputElement>>,
}

impl BrowserTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    fn file_input(&self) -> Result<HtmlInputElement, String> {
        if let Some(input) = self.file_input.borrow().as_ref() {
            return Ok(input.clone());
        }

        let document = document()?;
        let input: HtmlInputElement = document
            .create_element("input")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| "input element expected".to_string())?;
        input.set_type("file");
        input
            .style()
            .set_property("visibility", "hidden")
            .map_err(js_err)?;
        let body = document.body().ok_or_else(|| "document has no body".to_string())?;
        body.append_child(&input).map_err(js_err)?;

        *self.file_input.borrow_mut() = Some(input.clone());
        Ok(input)
    }
}

async fn fetch_bytes(url: String) -> Result<Vec<u8>, String> {
    let window = web_sys::window().ok_or_else(|| "no window available".to_string())?;
    let response: Response = JsFuture::from(window.fetch_with_str(&url))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| "fetch did not return a Response".to_string())?;

    if !response.ok() {
        return Err(format!(
            "HTTP {} - {} (URL: '{}')",
            response.status(),
            response.status_text(),
            url
        ));
    }

    let buffer = JsFuture::from(response.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

async fn read_picked(input: HtmlInputElement) -> Result<PickedFile, String> {
    let file = input
        .files()
        .and_then(|files| files.get(0))
        .ok_or_else(|| "no file chosen".to_string())?;
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(js_err)?;
    // allow choosing the same file again next time
    input.set_value("");
    Ok(PickedFile {
        name: file.name(),
        data: Uint8Array::new(&buffer).to_vec(),
    })
}

impl HostTransfer for BrowserTransfer {
    fn save(&self, data: &[u8], file_name: &str, mime: &str) -> Result<(), String> {
        let parts = Array::of1(&Uint8Array::from(data));
        let options = BlobPropertyBag::new();
        options.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
        let url = Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let document = document()?;
        let link: HtmlAnchorElement = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| "anchor element expected".to_string())?;
        link.set_href(&url);
        link.set_download(file_name);
        let body = document.body().ok_or_else(|| "document has no body".to_string())?;
        body.append_child(&link).map_err(js_err)?;
        link.click();

        defer(
            Closure::once_into_js(move || {
                link.remove();
                let _ = Url::revoke_object_url(&url);
            }),
            0,
        );
        Ok(())
    }

    fn fetch(&self, url: &str) -> LocalBoxFuture<'static, Result<Vec<u8>, String>> {
        fetch_bytes(url.to_string()).boxed_local()
    }

    fn pick_file(&self) -> LocalBoxFuture<'static, Result<PickedFile, String>> {
        let input = match self.file_input() {
            Ok(input) => input,
            Err(e) => return futures::future::ready(Err(e)).boxed_local(),
        };

        let (tx, rx) = oneshot::channel::<Result<PickedFile, String>>();
        let tx = Rc::new(RefCell::new(Some(tx)));
        let changed = Rc::new(Cell::new(false));

        let on_change = {
            let tx = tx.clone();
            let changed = changed.clone();
            let input = input.clone();
            Closure::once_into_js(move || {
                changed.set(true);
                if let Some(window) = web_sys::window() {
                    window.set_onfocus(None);
                }
                wasm_bindgen_futures::spawn_local(async move {
                    let result = read_picked(input).await;
                    if let Some(tx) = tx.borrow_mut().take() {
                        let _ = tx.send(result);
                    }
                });
            })
        };
        input.set_onchange(Some(on_change.unchecked_ref()));

        // the dialog gives focus back to the page when it closes
        let on_focus = Closure::once_into_js(move || {
            if let Some(window) = web_sys::window() {
                window.set_onfocus(None);
            }
            defer(
                Closure::once_into_js(move || {
                    if changed.get() {
                        return;
                    }
                    if let Some(tx) = tx.borrow_mut().take() {
                        let _ = tx.send(Err("no file chosen".to_string()));
                    }
                }),
                PICKER_CANCEL_GRACE_MS,
            );
        });
        if let Some(window) = web_sys::window() {
            window.set_onfocus(Some(on_focus.unchecked_ref()));
        }

        input.click();
        async move {
            rx.await
                .unwrap_or_else(|_| Err("no file chosen".to_string()))
        }
        .boxed_local()
    }
}
