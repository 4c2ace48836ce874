//! The markup contract between the loader and the host page.
//!
//! A deferred image looks like:
//!
//! ```html
//! <img class="sonny-lazy-images" data-src="/photos/large.jpg">
//! ```
//!
//! Once visible, `data-src` is removed and its value is written to `src`.
//! Because the query requires the pending attribute, a swapped image never
//! matches again.

/// Default marker class.
pub const MARKER_CLASS: &str = "sonny-lazy-images";
/// Attribute carrying the real URL until the image is loaded.
pub const PENDING_ATTR: &str = "data-src";
/// Attribute the real URL is written to.
pub const SOURCE_ATTR: &str = "src";

/// Names used to find and swap deferred images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    pub marker_class: String,
    pub pending_attr: String,
    pub source_attr: String,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            marker_class: MARKER_CLASS.to_string(),
            pending_attr: PENDING_ATTR.to_string(),
            source_attr: SOURCE_ATTR.to_string(),
        }
    }
}

impl Markup {
    /// CSS selector matching images that are marked and still pending.
    pub fn selector(&self) -> String {
        format!("img.{}[{}]", self.marker_class, self.pending_attr)
    }

    /// Whether an element with the given tag, classes and pending flag matches [`Self::selector`].
    pub fn matches<'a>(
        &self,
        tag: &str,
        mut classes: impl Iterator<Item = &'a str>,
        has_pending: bool,
    ) -> bool {
        has_pending
            && tag.eq_ignore_ascii_case("img")
            && classes.any(|c| c == self.marker_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selector() {
        assert_eq!(Markup::default().selector(), "img.sonny-lazy-images[data-src]");
    }

    #[test]
    fn test_matches() {
        let markup = Markup::default();
        assert!(markup.matches("IMG", ["hero", "sonny-lazy-images"].into_iter(), true));
        assert!(!markup.matches("img", ["sonny-lazy-images"].into_iter(), false));
        assert!(!markup.matches("div", ["sonny-lazy-images"].into_iter(), true));
        assert!(!markup.matches("img", ["lazy"].into_iter(), true));
    }
}
