//! The compiled interpreter module: an Emscripten-style object exposing
//! `isComplete`, `eval`, `evalAsync` and an `FS` filesystem.

use std::{cell::RefCell, rc::Rc};

use futures::{channel::oneshot, future::LocalBoxFuture, FutureExt};
use js_sys::Uint8Array;
use wasm_bindgen::{closure::Closure, JsValue};

use super::js::{call, js_err, property};
use crate::{commands::HostFs, eval::Evaluator};

const ASYNC_CALLBACK: &str = "evalAsyncCompleted";

pub struct ModuleEvaluator {
    module: JsValue,
}

impl ModuleEvaluator {
    pub fn new(module: JsValue) -> Self {
        Self { module }
    }
}

impl Evaluator for ModuleEvaluator {
    fn is_complete(&self, text: &str) -> bool {
        match call(&self.module, "isComplete", &[JsValue::from_str(text)]) {
            Ok(result) => result.is_truthy(),
            Err(e) => {
                tracing::warn!(error = %js_err(e), "isComplete failed, treating input as complete");
                true
            }
        }
    }

    fn eval(&self, text: &str) -> Result<(), String> {
        call(&self.module, "eval", &[JsValue::from_str(text)])
            .map(|_| ())
            .map_err(js_err)
    }

    fn eval_async(&self, text: &str) -> Option<LocalBoxFuture<'static, Result<i32, String>>> {
        let (tx, rx) = oneshot::channel::<i32>();
        let callback = Closure::once_into_js(move |status: JsValue| {
            let _ = tx.send(status.as_f64().map_or(0, |s| s as i32));
        });

        if let Err(e) = js_sys::Reflect::set(&self.module, &JsValue::from_str(ASYNC_CALLBACK), &callback) {
            return Some(futures::future::ready(Err(js_err(e))).boxed_local());
        }
        if let Err(e) = call(&self.module, "evalAsync", &[JsValue::from_str(text)]) {
            clear_callback(&self.module);
            return Some(futures::future::ready(Err(js_err(e))).boxed_local());
        }

        let module = self.module.clone();
        Some(
            async move {
                let status = rx.await;
                clear_callback(&module);
                status.map_err(|_| "asynchronous command never completed".to_string())
            }
            .boxed_local(),
        )
    }
}

fn clear_callback(module: &JsValue) {
    let _ = js_sys::Reflect::set(module, &JsValue::from_str(ASYNC_CALLBACK), &JsValue::UNDEFINED);
}

/// The module's in-memory filesystem.
pub struct ModuleFs {
    module: JsValue,
}

impl ModuleFs {
    pub fn new(module: JsValue) -> Self {
        Self { module }
    }

    fn fs(&self) -> Result<JsValue, String> {
        let fs = property(&self.module, "FS").map_err(js_err)?;
        if fs.is_undefined() {
            return Err("module has no filesystem".to_string());
        }
        Ok(fs)
    }
}

impl HostFs for ModuleFs {
    fn read_file(&self, path: &str) -> Result<Vec<u8>, String> {
        let data = call(&self.fs()?, "readFile", &[JsValue::from_str(path)]).map_err(js_err)?;
        Ok(Uint8Array::new(&data).to_vec())
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<(), String> {
        let bytes = Uint8Array::from(data);
        call(&self.fs()?, "writeFile", &[JsValue::from_str(path), bytes.into()])
            .map(|_| ())
            .map_err(js_err)
    }

    fn preload(&self, path: &str, data: &[u8]) -> LocalBoxFuture<'static, Result<(), String>> {
        let fs = match self.fs() {
            Ok(fs) => fs,
            Err(e) => return futures::future::ready(Err(e)).boxed_local(),
        };
        let parent = if path.starts_with('/') {
            JsValue::from_str("/")
        } else {
            call(&fs, "cwd", &[]).unwrap_or_else(|_| JsValue::from_str("/"))
        };

        let (tx, rx) = oneshot::channel::<Result<(), String>>();
        let tx = Rc::new(RefCell::new(Some(tx)));
        let on_load = {
            let tx = tx.clone();
            Closure::once_into_js(move || {
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(Ok(()));
                }
            })
        };
        let on_error = Closure::once_into_js(move || {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(Err("could not decode file".to_string()));
            }
        });

        // the file is already written, so the last flag skips creating it again
        let args = [
            parent,
            JsValue::from_str(path),
            Uint8Array::from(data).into(),
            JsValue::TRUE,
            JsValue::TRUE,
            on_load,
            on_error,
            JsValue::TRUE,
        ];
        if let Err(e) = call(&fs, "createPreloadedFile", &args) {
            return futures::future::ready(Err(js_err(e))).boxed_local();
        }

        async move {
            rx.await
                .unwrap_or_else(|_| Err("preload callback dropped".to_string()))
        }
        .boxed_local()
    }
}
