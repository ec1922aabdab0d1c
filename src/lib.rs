//! Streaming-manifest filtering gateway.
//!
//! The core of this crate is the filter pipeline: a URL-embedded directive
//! parser, an HLS master-playlist filter, and a DASH MPD filter. Everything
//! else (HTTP ingress, upstream fetching, configuration, the optional
//! Propeller origin resolver) is thin plumbing around that core.

pub mod bandwidth;
pub mod codec;
pub mod config;
pub mod dash;
pub mod directive;
pub mod errors;
pub mod fetch;
pub mod hls;
pub mod propeller;
pub mod web;

pub use directive::{FilterSpec, Protocol};
pub use errors::AppError;
