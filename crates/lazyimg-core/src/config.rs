//! Loader options.
//!
//! Options are resolved once, when the loader starts, and never change
//! afterwards. Resolution is deliberately forgiving: anything the resolver
//! does not understand falls back to the default for that key.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Default distance in pixels beyond the viewport at which images start loading.
pub const DEFAULT_OFFSET: f64 = 100.0;

/// Fully resolved loader options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Pixel margin added around the viewport on every side.
    #[serde(serialize_with = "serialize_offset")]
    pub offset: f64,
    /// Emit progress lines through the host's debug sink.
    pub debug: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            debug: false,
        }
    }
}

/// Caller-supplied options; `None` means "use the default".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialOptions {
    pub offset: Option<f64>,
    pub debug: Option<bool>,
}

impl PartialOptions {
    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }
}

impl From<PartialOptions> for Options {
    fn from(partial: PartialOptions) -> Self {
        Options::resolve(partial)
    }
}

impl Options {
    /// Merge typed caller options over the defaults.
    pub fn resolve(partial: PartialOptions) -> Self {
        let defaults = Self::default();
        Self {
            offset: partial.offset.unwrap_or(defaults.offset),
            debug: partial.debug.unwrap_or(defaults.debug),
        }
    }

    /// Merge an arbitrary JSON value over the defaults.
    ///
    /// Only `offset` and `debug` are looked at. Anything that is not an
    /// object resolves to the defaults.
    pub fn from_json(value: &Value) -> Self {
        let defaults = Self::default();
        let Value::Object(map) = value else {
            return defaults;
        };

        Self {
            offset: map
                .get("offset")
                .map_or(defaults.offset, |v| offset_from_json(v, defaults.offset)),
            debug: map.get("debug").map_or(defaults.debug, is_truthy),
        }
    }

    /// Replace the offset with a number read straight from the caller,
    /// bypassing JSON. JSON has no `Infinity` or `NaN`, so hosts that can
    /// see the raw value pass it here.
    pub fn with_raw_offset(mut self, offset: Option<f64>) -> Self {
        if let Some(offset) = offset {
            self.offset = offset;
        }
        self
    }

    /// The offset used for visibility checks. NaN counts as no offset.
    pub fn effective_offset(&self) -> f64 {
        if self.offset.is_nan() {
            0.0
        } else {
            self.offset
        }
    }
}

/// Whole numbers print without a fraction, like `JSON.stringify`.
fn serialize_offset<S: Serializer>(offset: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if offset.is_finite() && offset.fract() == 0.0 && offset.abs() < 9.0e15 {
        serializer.serialize_i64(*offset as i64)
    } else {
        serializer.serialize_f64(*offset)
    }
}

fn offset_from_json(value: &Value, default: f64) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(default),
        // A falsy offset behaves as zero in the visibility check.
        Value::Null | Value::Bool(false) => 0.0,
        _ => default,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
