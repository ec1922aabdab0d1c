//! DASH MPD filter.
//!
//! The MPD is modeled as `serde` structs deserialized/serialized through
//! `quick-xml`, following the `@`-attribute convention common across the
//! DASH-handling crates in the retrieval pack (`dash-mpd-rs` and others).

mod filter;
mod model;
mod renumber;

pub use filter::filter;
pub use model::{AdaptationSet, BaseUrl, Mpd, Period, Representation};
