use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

/// Message text of a thrown JS value.
pub fn js_err(value: JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

pub fn property(target: &JsValue, name: &str) -> Result<JsValue, JsValue> {
    Reflect::get(target, &JsValue::from_str(name))
}

/// Calls `target[name](...args)` with `target` as `this`.
pub fn call(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let method: Function = property(target, name)?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("'{}' is not a function", name)))?;
    method.apply(target, &args.iter().collect::<Array>())
}
