//! Scanning and listener lifecycle for deferred image loading.
//!
//! The loader is written against two small traits so the same logic runs in
//! a browser and in tests:
//!
//! - [`ImageHost`] finds pending images and reports the viewport
//! - [`ListenerRegistry`] adds and removes the loader's event listeners
//!
//! # Example
//!
//! ```
//! use lazyimg_core::{Bounds, Options, Viewport};
//! use lazyimg_scan::{LazyLoader, MemoryHost, MemoryRegistry};
//!
//! let host = MemoryHost::new(Viewport::new(1200.0, 800.0));
//! let hero = host.add_image(Bounds::from_rect(0.0, 0.0, 600.0, 400.0), "/hero.jpg");
//!
//! let loader = LazyLoader::init(Options::default(), host.clone(), MemoryRegistry::default());
//!
//! assert_eq!(host.attribute(hero, "src").as_deref(), Some("/hero.jpg"));
//! assert!(loader.is_subscribed());
//! ```

mod debug;
mod host;
mod loader;
mod memory;
mod scan;

pub use debug::{debug_info, format_debug_line, LOG_PREFIX};
pub use host::{ImageHost, LazyImage, ListenerRegistry, LoadEvent, Trigger};
pub use loader::{LazyLoader, ListenerState};
pub use memory::{ImageId, MemoryHost, MemoryImage, MemoryRegistry};
pub use scan::{scan_and_swap, ScanReport};
