//! Debug-mode output.

use lazyimg_core::Options;
use serde::Serialize;

use crate::host::ImageHost;

/// Prefix for every debug line.
pub const LOG_PREFIX: &str = "SonnyLazyImages:";

/// Render a debug line, or `None` for an empty message.
///
/// `att` is already-rendered JSON; with it the line reads `<prefix> <msg>: <att>`.
pub fn format_debug_line(msg: &str, att: Option<&str>) -> Option<String> {
    if msg.is_empty() {
        return None;
    }

    Some(match att {
        Some(att) => format!("{LOG_PREFIX} {msg}: {att}"),
        None => format!("{LOG_PREFIX} {msg}"),
    })
}

/// Send a line to the host's debug sink when debug mode is on.
pub fn debug_info<H, T>(host: &H, options: &Options, msg: &str, att: Option<&T>)
where
    H: ImageHost,
    T: Serialize + ?Sized,
{
    if !options.debug {
        return;
    }

    let att = att.and_then(|att| serde_json::to_string(att).ok());
    if let Some(line) = format_debug_line(msg, att.as_deref()) {
        host.debug(&line);
    }
}
