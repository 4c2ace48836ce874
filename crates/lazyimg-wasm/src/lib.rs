//! WebAssembly bindings for the lazy image loader.
//!
//! ## Example
//!
//! ```html
//! <img class="sonny-lazy-images" data-src="/photos/large.jpg">
//!
//! <script type="module">
//!   import init_wasm, { init, version } from './lazyimg_wasm.js';
//!
//!   await init_wasm();
//!   init({ offset: 200, debug: true });
//!   console.log(version());
//! </script>
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use lazyimg_core::Options;
use lazyimg_scan::{LazyLoader, Trigger};
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Event;

mod host;
mod listeners;

pub use host::{WebHost, WebImage};
pub use listeners::WindowListeners;

/// Install the panic hook and route `log` output to the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
}

/// Start lazy loading for the current page.
///
/// Recognized options are `offset` (pixels, default 100) and `debug`
/// (default false). Anything else, including a missing argument, falls
/// back to the defaults.
#[wasm_bindgen]
pub fn init(options: JsValue) -> Result<(), JsError> {
    let options = resolve_options(options);
    let host = WebHost::new().map_err(|e| JsError::new(&e.to_string()))?;
    let listeners = WindowListeners::new(host.window().clone());

    // The loader and its handler keep each other alive for the rest of the
    // page, so the handler can never be dropped while it runs.
    let loader = Rc::new(RefCell::new(LazyLoader::new(options, host, listeners)));
    let handle = Rc::clone(&loader);
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        match handle.try_borrow_mut() {
            Ok(mut loader) => {
                loader.handle(Trigger::from_event_type(&event.type_()));
            }
            Err(_) => log::debug!("scan in progress, dropping '{}' event", event.type_()),
        }
    });

    let mut active = loader.borrow_mut();
    active.registry_mut().bind(callback);
    active.start();
    Ok(())
}

/// Library version.
#[wasm_bindgen]
pub fn version() -> String {
    lazyimg_core::VERSION.to_string()
}

fn resolve_options(options: JsValue) -> Options {
    let offset = raw_offset(&options);
    let resolved = match serde_wasm_bindgen::from_value::<serde_json::Value>(options) {
        Ok(value) => Options::from_json(&value),
        Err(e) => {
            log::debug!("unreadable options, using defaults: {e}");
            Options::default()
        }
    };
    resolved.with_raw_offset(offset)
}

/// A numeric `offset` own property, read before JSON conversion loses
/// `Infinity` and `NaN`.
fn raw_offset(options: &JsValue) -> Option<f64> {
    if !options.is_object() {
        return None;
    }
    let key = JsValue::from_str("offset");
    if !options.unchecked_ref::<Object>().has_own_property(&key) {
        return None;
    }
    Reflect::get(options, &key).ok()?.as_f64()
}
