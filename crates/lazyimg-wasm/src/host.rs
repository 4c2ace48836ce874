//! Browser document host.

use lazyimg_core::{Bounds, LazyError, Markup, Viewport};
use lazyimg_scan::{ImageHost, LazyImage};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Window};

/// The live page.
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    /// Bind to the global window and its document.
    pub fn new() -> Result<Self, LazyError> {
        let window = web_sys::window().ok_or_else(|| LazyError::unsupported("window"))?;
        let document = window
            .document()
            .ok_or_else(|| LazyError::unsupported("document"))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl ImageHost for WebHost {
    type Image = WebImage;

    fn query_pending(&self, markup: &Markup) -> Vec<WebImage> {
        let list = match self.document.query_selector_all(&markup.selector()) {
            Ok(list) => list,
            Err(err) => {
                log::warn!("{}", LazyError::host(format!("querySelectorAll failed: {err:?}")));
                return Vec::new();
            }
        };

        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(WebImage)
            .collect()
    }

    fn viewport(&self) -> Viewport {
        let (client_width, client_height) = self
            .document
            .document_element()
            .map_or((0.0, 0.0), |root| {
                (root.client_width() as f64, root.client_height() as f64)
            });

        Viewport::resolve(
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
            client_width,
            client_height,
        )
    }
}

fn dimension(value: Result<JsValue, JsValue>) -> Option<f64> {
    value.ok().and_then(|v| v.as_f64())
}

/// A deferred `<img>` element.
pub struct WebImage(pub Element);

impl LazyImage for WebImage {
    fn bounds(&self) -> Bounds {
        let rect = self.0.get_bounding_client_rect();
        Bounds::new(rect.top(), rect.left(), rect.bottom(), rect.right())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = self.0.set_attribute(name, value) {
            log::warn!("{}", LazyError::host(format!("setAttribute({name}) failed: {err:?}")));
        }
    }

    fn remove_attribute(&self, name: &str) {
        if let Err(err) = self.0.remove_attribute(name) {
            log::warn!("{}", LazyError::host(format!("removeAttribute({name}) failed: {err:?}")));
        }
    }
}
