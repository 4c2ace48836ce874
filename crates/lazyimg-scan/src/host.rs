//! Host abstractions.

use std::fmt;

use lazyimg_core::{Bounds, Markup, Viewport};

/// A deferred image element.
///
/// Methods take `&self`: DOM handles are references into a document the
/// host owns.
pub trait LazyImage {
    /// Bounding box relative to the viewport.
    fn bounds(&self) -> Bounds;

    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    fn remove_attribute(&self, name: &str);
}

/// A document that can be scanned for deferred images.
pub trait ImageHost {
    type Image: LazyImage;

    /// All images matching `markup.selector()`, in document order.
    fn query_pending(&self, markup: &Markup) -> Vec<Self::Image>;

    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Sink for debug-mode lines.
    fn debug(&self, line: &str) {
        log::info!("{line}");
    }
}

/// Events the loader listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadEvent {
    DomContentLoaded,
    Load,
    Resize,
    Scroll,
}

impl LoadEvent {
    pub const ALL: [LoadEvent; 4] = [
        LoadEvent::DomContentLoaded,
        LoadEvent::Load,
        LoadEvent::Resize,
        LoadEvent::Scroll,
    ];

    /// DOM event type name.
    pub fn name(&self) -> &'static str {
        match self {
            LoadEvent::DomContentLoaded => "DOMContentLoaded",
            LoadEvent::Load => "load",
            LoadEvent::Resize => "resize",
            LoadEvent::Scroll => "scroll",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == name)
    }
}

impl fmt::Display for LoadEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Explicit listener registration with its matching deregistration.
///
/// A registry is bound to one loader; `add_listener` wires that loader's
/// handler to `event`.
pub trait ListenerRegistry {
    fn add_listener(&mut self, event: LoadEvent);

    fn remove_listener(&mut self, event: LoadEvent);
}

/// Why a scan pass ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Called directly, e.g. the immediate pass at startup.
    Invocation,
    Event(LoadEvent),
}

impl Trigger {
    /// Map a DOM event type to a trigger. Unknown types count as a direct call.
    pub fn from_event_type(event_type: &str) -> Self {
        LoadEvent::from_name(event_type).map_or(Trigger::Invocation, Trigger::Event)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Invocation => f.write_str("function invocation"),
            Trigger::Event(event) => event.fmt(f),
        }
    }
}
