use std::time::Duration;

use futures::{future::LocalBoxFuture, FutureExt};
use js_sys::Promise;
use wasm_bindgen_futures::JsFuture;

use crate::console::Sleeper;

/// Dispatch delay on `setTimeout`, letting the widget paint echoed input
/// before a long synchronous evaluation blocks the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutSleeper;

impl Sleeper for TimeoutSleeper {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let Some(window) = web_sys::window() else {
            return futures::future::ready(()).boxed_local();
        };
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let promise = Promise::new(&mut |resolve, _reject| {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis);
        });
        async move {
            let _ = JsFuture::from(promise).await;
        }
        .boxed_local()
    }
}
