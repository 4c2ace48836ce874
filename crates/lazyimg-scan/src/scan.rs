//! The scan-and-swap pass.

use lazyimg_core::{Markup, Options};

use crate::debug::debug_info;
use crate::host::{ImageHost, LazyImage, Trigger};

/// Outcome of one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    pub trigger: Trigger,
    /// Number of pending images the pass started with.
    pub pending: usize,
    /// URLs swapped in during this pass, in document order.
    pub loaded: Vec<String>,
}

impl ScanReport {
    /// True when the pass started with nothing pending.
    ///
    /// This looks at the count before swapping, so the pass that loads the
    /// last image still reports work left; the following pass is the one
    /// that observes an empty document.
    pub fn is_exhausted(&self) -> bool {
        self.pending == 0
    }

    /// Images still pending after this pass.
    pub fn remaining(&self) -> usize {
        self.pending - self.loaded.len()
    }
}

/// Swap every visible pending image to its real source.
pub fn scan_and_swap<H: ImageHost>(
    host: &H,
    options: &Options,
    markup: &Markup,
    trigger: Trigger,
) -> ScanReport {
    let targets = host.query_pending(markup);
    let viewport = host.viewport();
    let offset = options.effective_offset();

    let mut loaded = Vec::new();
    for image in &targets {
        if !viewport.contains(&image.bounds(), offset) {
            continue;
        }
        // Another script may have swapped it since the query.
        let Some(url) = image.attribute(&markup.pending_attr) else {
            continue;
        };

        let att = (!url.is_empty()).then_some(url.as_str());
        debug_info(host, options, "loading image", att);

        image.set_attribute(&markup.source_attr, &url);
        image.remove_attribute(&markup.pending_attr);
        loaded.push(url);
    }

    ScanReport {
        trigger,
        pending: targets.len(),
        loaded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHost;
    use lazyimg_core::{Bounds, Viewport};
    use proptest::prelude::*;

    fn host() -> MemoryHost {
        MemoryHost::new(Viewport::new(1200.0, 800.0))
    }

    #[test]
    fn test_swaps_only_visible() {
        let host = host();
        let top = host.add_image(Bounds::from_rect(0.0, 0.0, 300.0, 200.0), "/top.jpg");
        let far = host.add_image(Bounds::from_rect(0.0, 2000.0, 300.0, 200.0), "/far.jpg");

        let report = scan_and_swap(&host, &Options::default(), &Markup::default(), Trigger::Invocation);

        assert_eq!(report.pending, 2);
        assert_eq!(report.loaded, vec!["/top.jpg".to_string()]);
        assert_eq!(report.remaining(), 1);

        assert_eq!(host.attribute(top, "src").as_deref(), Some("/top.jpg"));
        assert_eq!(host.attribute(top, "data-src"), None);
        assert_eq!(host.attribute(far, "src"), None);
        assert_eq!(host.attribute(far, "data-src").as_deref(), Some("/far.jpg"));
    }

    #[test]
    fn test_swapped_image_not_processed_twice() {
        let host = host();
        host.add_image(Bounds::from_rect(0.0, 0.0, 300.0, 200.0), "/top.jpg");

        let markup = Markup::default();
        let first = scan_and_swap(&host, &Options::default(), &markup, Trigger::Invocation);
        let second = scan_and_swap(&host, &Options::default(), &markup, Trigger::Invocation);

        assert!(!first.is_exhausted());
        assert_eq!(first.loaded.len(), 1);
        assert!(second.is_exhausted());
        assert!(second.loaded.is_empty());
        assert_eq!(host.mutation_count(), 2);
    }

    #[test]
    fn test_unmarked_images_ignored() {
        let host = host();
        let plain = host.add_element(
            "img",
            &["thumbnail"],
            &[("data-src", "/plain.jpg")],
            Bounds::from_rect(0.0, 0.0, 10.0, 10.0),
        );

        let report = scan_and_swap(&host, &Options::default(), &Markup::default(), Trigger::Invocation);

        assert!(report.is_exhausted());
        assert_eq!(host.attribute(plain, "src"), None);
    }

    #[test]
    fn test_offset_controls_early_loading() {
        let host = host();
        // 50px below the fold
        host.add_image(Bounds::from_rect(0.0, 850.0, 300.0, 0.0), "/edge.jpg");

        let strict = Options { offset: 0.0, debug: false };
        let report = scan_and_swap(&host, &strict, &Markup::default(), Trigger::Invocation);
        assert!(report.loaded.is_empty());

        let report = scan_and_swap(&host, &Options::default(), &Markup::default(), Trigger::Invocation);
        assert_eq!(report.loaded, vec!["/edge.jpg".to_string()]);
    }

    #[test]
    fn test_custom_markup() {
        let host = host();
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

        let report = scan_and_swap(&host, &Options::default(), &markup, Trigger::Invocation);

        assert_eq!(report.loaded.len(), 1);
        assert_eq!(host.attribute(id, "src").as_deref(), Some("/custom.jpg"));
        assert_eq!(host.attribute(id, "data-lazy"), None);
    }

    proptest! {
        #[test]
        fn prop_scan_swaps_exactly_the_visible(
            rects in proptest::collection::vec(
                (-500.0f64..2000.0, -500.0f64..3000.0, 1.0f64..400.0, 1.0f64..400.0),
                0..24,
            ),
            offset in 0.0f64..300.0,
        ) {
            let viewport = Viewport::new(1200.0, 800.0);
            let host = MemoryHost::new(viewport);
            let options = Options { offset, debug: false };
            let images: Vec<_> = rects
                .iter()
                .enumerate()
                .map(|(i, &(x, y, w, h))| {
                    let rect = Bounds::from_rect(x, y, w, h);
                    (host.add_image(rect, &format!("/{i}.jpg")), rect)
                })
                .collect();

            let report = scan_and_swap(&host, &options, &Markup::default(), Trigger::Invocation);
            prop_assert_eq!(report.pending, images.len());

            for (i, (id, rect)) in images.iter().enumerate() {
                let url = format!("/{i}.jpg");
                if viewport.contains(rect, offset) {
                    prop_assert_eq!(host.attribute(*id, "src"), Some(url));
                    prop_assert_eq!(host.attribute(*id, "data-src"), None);
                } else {
                    prop_assert_eq!(host.attribute(*id, "src"), None);
                    prop_assert_eq!(host.attribute(*id, "data-src"), Some(url));
                }
            }
        }
    }
}
