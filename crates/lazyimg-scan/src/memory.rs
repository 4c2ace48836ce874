//! In-memory document for tests and benchmarks.
//!
//! Element rectangles are stored in document coordinates; the host
//! subtracts the scroll position when reporting bounds, the way a browser
//! does for `getBoundingClientRect()`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use lazyimg_core::{Bounds, Markup, Viewport};

use crate::host::{ImageHost, LazyImage, ListenerRegistry, LoadEvent, Trigger};
use crate::loader::LazyLoader;
use crate::scan::ScanReport;

/// Handle to an element added to a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub usize);

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    rect: Bounds,
}

#[derive(Debug)]
struct DocumentState {
    nodes: Vec<Node>,
    inner: Option<Viewport>,
    client: Viewport,
    scroll_x: f64,
    scroll_y: f64,
    debug_lines: Vec<String>,
    mutations: usize,
}

/// A shared, mutable in-memory document.
///
/// Clones refer to the same document.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    state: Rc<RefCell<DocumentState>>,
}

impl MemoryHost {
    /// Create an empty document whose window reports `viewport`.
    pub fn new(viewport: Viewport) -> Self {
        Self::with_sizes(Some(viewport), viewport)
    }

    /// Create a document with separate window and root-element sizes.
    /// `inner = None` models a host without window inner dimensions.
    pub fn with_sizes(inner: Option<Viewport>, client: Viewport) -> Self {
        Self {
            state: Rc::new(RefCell::new(DocumentState {
                nodes: Vec::new(),
                inner,
                client,
                scroll_x: 0.0,
                scroll_y: 0.0,
                debug_lines: Vec::new(),
                mutations: 0,
            })),
        }
    }

    /// Add a deferred image with the default markup.
    pub fn add_image(&self, rect: Bounds, url: &str) -> ImageId {
        let markup = Markup::default();
        self.add_element(
            "img",
            &[markup.marker_class.as_str()],
            &[(markup.pending_attr.as_str(), url)],
            rect,
        )
    }

    /// Add an arbitrary element.
    pub fn add_element(
        &self,
        tag: &str,
        classes: &[&str],
        attributes: &[(&str, &str)],
        rect: Bounds,
    ) -> ImageId {
        let mut state = self.state.borrow_mut();
        state.nodes.push(Node {
            tag: tag.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            rect,
        });
        ImageId(state.nodes.len() - 1)
    }

    pub fn attribute(&self, id: ImageId, name: &str) -> Option<String> {
        self.state.borrow().nodes.get(id.0)?.attributes.get(name).cloned()
    }

    /// Scroll the window to an absolute position.
    pub fn scroll_to(&self, x: f64, y: f64) {
        let mut state = self.state.borrow_mut();
        state.scroll_x = x;
        state.scroll_y = y;
    }

    /// Resize both the window and the root element.
    pub fn resize(&self, width: f64, height: f64) {
        let mut state = self.state.borrow_mut();
        let viewport = Viewport::new(width, height);
        if state.inner.is_some() {
            state.inner = Some(viewport);
        }
        state.client = viewport;
    }

    /// Lines received through the debug sink.
    pub fn debug_lines(&self) -> Vec<String> {
        self.state.borrow().debug_lines.clone()
    }

    /// Number of attribute writes and removals so far.
    pub fn mutation_count(&self) -> usize {
        self.state.borrow().mutations
    }

    fn image(&self, index: usize) -> MemoryImage {
        MemoryImage {
            state: Rc::clone(&self.state),
            index,
        }
    }
}

impl ImageHost for MemoryHost {
    type Image = MemoryImage;

    fn query_pending(&self, markup: &Markup) -> Vec<MemoryImage> {
        let matching: Vec<usize> = self
            .state
            .borrow()
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| {
                markup.matches(
                    &node.tag,
                    node.classes.iter().map(String::as_str),
                    node.attributes.contains_key(&markup.pending_attr),
                )
            })
            .map(|(index, _)| index)
            .collect();

        matching.into_iter().map(|index| self.image(index)).collect()
    }

    fn viewport(&self) -> Viewport {
        let state = self.state.borrow();
        Viewport::resolve(
            state.inner.map(|v| v.width),
            state.inner.map(|v| v.height),
            state.client.width,
            state.client.height,
        )
    }

    fn debug(&self, line: &str) {
        log::info!("{line}");
        self.state.borrow_mut().debug_lines.push(line.to_string());
    }
}

/// An element handle into a [`MemoryHost`].
#[derive(Debug, Clone)]
pub struct MemoryImage {
    state: Rc<RefCell<DocumentState>>,
    index: usize,
}

impl MemoryImage {
    pub fn id(&self) -> ImageId {
        ImageId(self.index)
    }
}

impl LazyImage for MemoryImage {
    fn bounds(&self) -> Bounds {
        let state = self.state.borrow();
        state.nodes[self.index]
            .rect
            .translate(-state.scroll_x, -state.scroll_y)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().nodes[self.index].attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        state.nodes[self.index]
            .attributes
            .insert(name.to_string(), value.to_string());
        state.mutations += 1;
    }

    fn remove_attribute(&self, name: &str) {
        let mut state = self.state.borrow_mut();
        if state.nodes[self.index].attributes.remove(name).is_some() {
            state.mutations += 1;
        }
    }
}

/// Records which events a loader listens to.
///
/// A registry stands for one handler, so adding the same event twice is a
/// no-op, as `addEventListener` is for a repeated function. Separate
/// loaders get separate registries.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    listeners: Rc<RefCell<Vec<LoadEvent>>>,
}

impl MemoryRegistry {
    pub fn is_listening(&self, event: LoadEvent) -> bool {
        self.listeners.borrow().contains(&event)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ListenerRegistry for MemoryRegistry {
    fn add_listener(&mut self, event: LoadEvent) {
        let mut listeners = self.listeners.borrow_mut();
        if !listeners.contains(&event) {
            listeners.push(event);
        }
    }

    fn remove_listener(&mut self, event: LoadEvent) {
        self.listeners.borrow_mut().retain(|e| *e != event);
    }
}

impl LazyLoader<MemoryHost, MemoryRegistry> {
    /// Deliver `event` the way a browser would: only if a listener for it
    /// is attached.
    pub fn dispatch(&mut self, event: LoadEvent) -> Option<ScanReport> {
        if !self.registry().is_listening(event) {
            return None;
        }
        Some(self.handle(Trigger::Event(event)))
    }
}
