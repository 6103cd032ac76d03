//! wasm-bindgen front end: an xterm.js widget on one side, the compiled
//! interpreter module on the other.

mod js;
mod module;
mod renderer;
mod timer;
mod transfer;

use std::rc::Rc;

use wasm_bindgen::{closure::Closure, prelude::*};
use web_sys::KeyboardEvent;

pub use module::{ModuleEvaluator, ModuleFs};
pub use renderer::XtermRenderer;
pub use timer::TimeoutSleeper;
pub use transfer::BrowserTransfer;

use crate::{
    commands::{CommandTable, HostIo},
    config::{ColorMode, ConsoleConfig},
    console::{Console, Dispatcher},
    input::{Key, KeyEvent, KeyPhase},
    style::MessageStyler,
};
use js::{call, property};

/// Option names read from the constructor's options object.
const OPTION_KEYS: [&str; 4] = ["greeting", "delay", "continuation", "preload"];

fn config_from_options(options: &JsValue) -> Result<ConsoleConfig, JsValue> {
    let mut config = ConsoleConfig::default();
    if options.is_undefined() || options.is_null() {
        return Ok(config);
    }

    for key in OPTION_KEYS {
        let value = property(options, key)?;
        let text = if let Some(s) = value.as_string() {
            s
        } else if let Some(n) = value.as_f64() {
            format!("{}", n)
        } else if let Some(b) = value.as_bool() {
            b.to_string()
        } else {
            continue;
        };
        config
            .set(key, &text)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
    }
    Ok(config)
}

fn key_event(event: &KeyboardEvent) -> KeyEvent {
    KeyEvent {
        key: Key::from_dom(event.key_code(), &event.key()),
        phase: KeyPhase::from_dom(&event.type_()),
        ctrl: event.ctrl_key(),
    }
}

/// Console bound to an xterm.js `Terminal`.
///
/// ```js
/// const console = new WebConsole(term, { greeting: "Draw" });
/// Module.onRuntimeInitialized = () => console.attachModule(Module);
/// ```
#[wasm_bindgen]
pub struct WebConsole {
    console: Console,
}

#[wasm_bindgen]
impl WebConsole {
    #[wasm_bindgen(constructor)]
    pub fn new(term: JsValue, options: JsValue) -> Result<WebConsole, JsValue> {
        let config = config_from_options(&options)?;
        let console = Console::with_styler(
            Box::new(XtermRenderer::new(term.clone())),
            config,
            MessageStyler::new(ColorMode::Always),
        );

        let on_data = {
            let console = console.clone();
            Closure::<dyn FnMut(String)>::new(move |data: String| console.on_data(&data))
        };
        call(&term, "onData", &[on_data.as_ref().clone()])?;
        on_data.forget();

        let on_key = {
            let console = console.clone();
            Closure::<dyn FnMut(KeyboardEvent) -> bool>::new(move |event: KeyboardEvent| {
                console.on_key(key_event(&event))
            })
        };
        call(&term, "attachCustomKeyEventHandler", &[on_key.as_ref().clone()])?;
        on_key.forget();

        console.terminal().focus();
        Ok(WebConsole { console })
    }

    /// Starts dispatching to `module` and shows the first prompt.
    #[wasm_bindgen(js_name = attachModule)]
    pub fn attach_module(&self, module: JsValue) -> Result<(), JsValue> {
        let host = HostIo::new(
            Rc::new(ModuleFs::new(module.clone())),
            Rc::new(BrowserTransfer::new()),
        );
        let table = CommandTable::standard();
        let dispatcher = Dispatcher::new(&self.console, host, Rc::new(TimeoutSleeper))
            .map_err(|e| JsValue::from_str(&e.to_string()))?
            .with_table(table.clone());
        wasm_bindgen_futures::spawn_local(dispatcher.run());

        self.console
            .attach_evaluator_with_help(Rc::new(ModuleEvaluator::new(module)), &table);
        Ok(())
    }

    #[wasm_bindgen(js_name = failLoad)]
    pub fn fail_load(&self, message: &str) {
        self.console.fail_load(message);
    }

    /// Writes a loading dot. Returns `false` once loading is over so the
    /// caller can stop its timer.
    #[wasm_bindgen(js_name = loadProgress)]
    pub fn load_progress(&self) -> bool {
        self.console.load_progress()
    }

    /// Interpreter message with gravity 0..=4; anything else prints plain.
    #[wasm_bindgen(js_name = printMessage)]
    pub fn print_message(&self, text: &str, gravity: i32) {
        self.console.print_message(text, gravity);
    }

    /// Standard output hook for the module.
    pub fn print(&self, text: &str) {
        self.console.print_message(text, -1);
    }

    #[wasm_bindgen(js_name = pasteScript)]
    pub fn paste_script(&self, script: &str) {
        self.console.paste_script(script);
    }

    #[wasm_bindgen(js_name = isBusy)]
    pub fn is_busy(&self) -> bool {
        self.console.is_busy()
    }
}
