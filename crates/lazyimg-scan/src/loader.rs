//! Loader lifecycle.
//!
//! ```text
//! Unsubscribed --start()--> Subscribed --exhausted pass--> Unsubscribed
//! ```
//!
//! There is no way back to `Subscribed` short of starting a new loader.

use lazyimg_core::{Markup, Options};

use crate::debug::debug_info;
use crate::host::{ImageHost, ListenerRegistry, LoadEvent, Trigger};
use crate::scan::{scan_and_swap, ScanReport};

/// Whether the loader's listeners are currently attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Unsubscribed,
    Subscribed,
}

/// Owns the resolved options and drives scan passes for one host.
pub struct LazyLoader<H, R> {
    options: Options,
    markup: Markup,
    host: H,
    registry: R,
    state: ListenerState,
}

impl<H: ImageHost, R: ListenerRegistry> LazyLoader<H, R> {
    /// Create an idle loader. Nothing is subscribed until [`Self::start`].
    pub fn new(options: Options, host: H, registry: R) -> Self {
        Self {
            options,
            markup: Markup::default(),
            host,
            registry,
            state: ListenerState::Unsubscribed,
        }
    }

    /// Use different marker names.
    pub fn with_markup(mut self, markup: Markup) -> Self {
        self.markup = markup;
        self
    }

    /// Create a loader, subscribe it and run the first pass.
    pub fn init(options: Options, host: H, registry: R) -> Self {
        let mut loader = Self::new(options, host, registry);
        loader.start();
        loader
    }

    /// Subscribe to all load events and scan once immediately, so images
    /// already on screen load without waiting for an event.
    ///
    /// A loader registers one handler, so starting it twice leaves one
    /// listener per event. Separate loaders each add their own.
    pub fn start(&mut self) -> ScanReport {
        debug_info::<_, Options>(&self.host, &self.options, "I am so lazy", None);
        debug_info(&self.host, &self.options, "Options", Some(&self.options));

        for event in LoadEvent::ALL {
            self.registry.add_listener(event);
        }
        self.state = ListenerState::Subscribed;
        log::debug!("lazy loader subscribed to {} events", LoadEvent::ALL.len());

        self.handle(Trigger::Invocation)
    }

    /// Run one pass. A pass that starts with nothing pending detaches the
    /// loader from every event.
    pub fn handle(&mut self, trigger: Trigger) -> ScanReport {
        let report = scan_and_swap(&self.host, &self.options, &self.markup, trigger);

        if report.is_exhausted() && self.state == ListenerState::Subscribed {
            for event in LoadEvent::ALL {
                self.registry.remove_listener(event);
            }
            self.state = ListenerState::Unsubscribed;
            log::debug!("no pending images left after {trigger}, listeners removed");
        }

        report
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn markup(&self) -> &Markup {
        &self.markup
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    pub fn state(&self) -> ListenerState {
        self.state
    }

    pub fn is_subscribed(&self) -> bool {
        self.state == ListenerState::Subscribed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryHost, MemoryRegistry};
    use lazyimg_core::{Bounds, PartialOptions, Viewport};

    fn page() -> MemoryHost {
        MemoryHost::new(Viewport::new(1200.0, 800.0))
    }

    #[test]
    fn test_new_is_idle() {
        let loader = LazyLoader::new(Options::default(), page(), MemoryRegistry::default());
        assert_eq!(loader.state(), ListenerState::Unsubscribed);
        assert_eq!(loader.registry().listener_count(), 0);
    }

    #[test]
    fn test_init_loads_visible_image_immediately() {
        let host = page();
        let img = host.add_image(Bounds::from_rect(100.0, 100.0, 400.0, 300.0), "/hero.jpg");

        let loader = LazyLoader::init(Options::default(), host.clone(), MemoryRegistry::default());

        assert_eq!(host.attribute(img, "src").as_deref(), Some("/hero.jpg"));
        assert_eq!(host.attribute(img, "data-src"), None);
        // the pass that loaded the last image still saw one pending
        assert!(loader.is_subscribed());
        assert_eq!(loader.registry().listener_count(), 4);
    }

    #[test]
    fn test_debug_output_on_init() {
        let host = page();
        host.add_image(Bounds::from_rect(100.0, 100.0, 400.0, 300.0), "/hero.jpg");
        let options = Options::resolve(PartialOptions::default().debug(true));

        LazyLoader::init(options, host.clone(), MemoryRegistry::default());

        insta::assert_snapshot!(host.debug_lines().join("\n"), @r###"
        SonnyLazyImages: I am so lazy
        SonnyLazyImages: Options: {"offset":100,"debug":true}
        SonnyLazyImages: loading image: "/hero.jpg"
        "###);
    }

    #[test]
    fn test_quiet_without_debug() {
        let host = page();
        host.add_image(Bounds::from_rect(0.0, 0.0, 10.0, 10.0), "/a.jpg");

        LazyLoader::init(Options::default(), host.clone(), MemoryRegistry::default());

        assert!(host.debug_lines().is_empty());
    }

    #[test]
    fn test_empty_page_unsubscribes_on_init() {
        let host = page();
        let mut loader = LazyLoader::new(Options::default(), host, MemoryRegistry::default());

        let report = loader.start();

        assert!(report.is_exhausted());
        assert_eq!(loader.state(), ListenerState::Unsubscribed);
        assert_eq!(loader.registry().listener_count(), 0);
    }

    #[test]
    fn test_unsubscribes_one_pass_late() {
        let host = page();
        host.add_image(Bounds::from_rect(0.0, 0.0, 10.0, 10.0), "/a.jpg");
        let mut loader = LazyLoader::init(Options::default(), host, MemoryRegistry::default());
        assert!(loader.is_subscribed());

        let report = loader.handle(Trigger::Event(LoadEvent::Load));

        assert!(report.is_exhausted());
        assert!(!loader.is_subscribed());
    }

    #[test]
    fn test_start_twice_keeps_one_listener_per_event() {
        let host = page();
        host.add_image(Bounds::from_rect(0.0, 5000.0, 10.0, 10.0), "/far.jpg");
        let mut loader = LazyLoader::new(Options::default(), host, MemoryRegistry::default());

        loader.start();
        loader.start();

        assert_eq!(loader.registry().listener_count(), 4);
    }

    #[test]
    fn test_custom_markup_through_loader() {
        let host = page();
        let id = host.add_element(
            "img",
            &["deferred"],
            &[("data-lazy", "/custom.jpg")],
            Bounds::from_rect(0.0, 0.0, 10.0, 10.0),
        );
        let markup = Markup {
            marker_class: "deferred".into(),
            pending_attr: "data-lazy".into(),
            source_attr: "src".into(),
        };
        let options = Options { offset: 0.0, debug: false };

        let mut loader = LazyLoader::new(options, host.clone(), MemoryRegistry::default())
            .with_markup(markup.clone());
        assert_eq!(loader.markup(), &markup);
        assert_eq!(loader.options(), &options);

        let report = loader.start();

        assert_eq!(report.loaded, vec!["/custom.jpg".to_string()]);
        assert_eq!(host.attribute(id, "src").as_deref(), Some("/custom.jpg"));
    }

    #[test]
    fn test_infinite_offset_loads_everything() {
        let host = page();
        let far = host.add_image(Bounds::from_rect(0.0, 1.0e6, 10.0, 10.0), "/far.jpg");
        let options = Options::default().with_raw_offset(Some(f64::INFINITY));

        LazyLoader::init(options, host.clone(), MemoryRegistry::default());

        assert_eq!(host.attribute(far, "src").as_deref(), Some("/far.jpg"));
    }
}
