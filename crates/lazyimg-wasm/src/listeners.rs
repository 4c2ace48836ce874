//! Window event listener registration.

use js_sys::Function;
use lazyimg_core::LazyError;
use lazyimg_scan::{ListenerRegistry, LoadEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, Window};

/// Attaches one handler closure to the window for each load event.
pub struct WindowListeners {
    window: Window,
    callback: Option<Closure<dyn FnMut(Event)>>,
}

impl WindowListeners {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: None,
        }
    }

    /// Set the handler. Must happen before any listener is added.
    pub fn bind(&mut self, callback: Closure<dyn FnMut(Event)>) {
        self.callback = Some(callback);
    }

    fn function(&self) -> Option<&Function> {
        self.callback.as_ref().map(|c| c.as_ref().unchecked_ref())
    }
}

impl ListenerRegistry for WindowListeners {
    fn add_listener(&mut self, event: LoadEvent) {
        let Some(function) = self.function() else {
            log::warn!("no handler bound, not listening to '{event}'");
            return;
        };

        if let Err(err) = self.window.add_event_listener_with_callback(event.name(), function) {
            let err = LazyError::Listener { event: event.name(), reason: format!("{err:?}") };
            log::warn!("{err}");
        }
    }

    fn remove_listener(&mut self, event: LoadEvent) {
        let Some(function) = self.function() else {
            return;
        };

        if let Err(err) = self.window.remove_event_listener_with_callback(event.name(), function) {
            log::warn!("failed to remove '{event}' listener: {err:?}");
        }
    }
}
