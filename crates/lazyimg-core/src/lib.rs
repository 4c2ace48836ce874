//! Core types for deferred image loading.
//!
//! This crate holds everything that does not touch a live document:
//! - Loader options and the permissive options resolver
//! - Viewport geometry and the visibility rule
//! - The markup contract shared with host pages
//! - Error types

pub mod config;
pub mod errors;
pub mod geometry;
pub mod markup;

pub use config::*;
pub use errors::*;
pub use geometry::*;
pub use markup::*;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
