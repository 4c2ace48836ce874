//! Viewport geometry and the visibility rule.

/// An element's bounding box relative to the viewport's top-left corner,
/// in CSS pixels. Mirrors what `getBoundingClientRect()` reports.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Bounds {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self { top, left, bottom, right }
    }

    /// Create bounds from a position and a size.
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            top: y,
            left: x,
            bottom: y + height,
            right: x + width,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Shift the box by `dx`, `dy`.
    pub fn translate(&self, dx: f64, dy: f64) -> Bounds {
        Bounds::new(self.top + dy, self.left + dx, self.bottom + dy, self.right + dx)
    }
}

/// Size of the visible area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Pick the viewport size from what the host exposes.
    ///
    /// Window inner dimensions win when they are usable; otherwise the
    /// document root element's client dimensions are used, per axis.
    pub fn resolve(
        inner_width: Option<f64>,
        inner_height: Option<f64>,
        client_width: f64,
        client_height: f64,
    ) -> Self {
        Self {
            width: usable(inner_width).unwrap_or(client_width),
            height: usable(inner_height).unwrap_or(client_height),
        }
    }

    /// Whether `bounds` lies within this viewport grown by `offset` on every side.
    pub fn contains(&self, bounds: &Bounds, offset: f64) -> bool {
        is_in_viewport(bounds, self, offset)
    }
}

fn usable(dimension: Option<f64>) -> Option<f64> {
    // Zero counts as missing regardless of the offset being applied.
    dimension.filter(|d| d.is_finite() && *d > 0.0)
}

/// Visibility check.
///
/// An element is visible when its whole box fits inside the viewport
/// expanded by `offset` pixels in every direction.
pub fn is_in_viewport(bounds: &Bounds, viewport: &Viewport, offset: f64) -> bool {
    bounds.top >= -offset
        && bounds.left >= -offset
        && bounds.bottom <= viewport.height + offset
        && bounds.right <= viewport.width + offset
}
