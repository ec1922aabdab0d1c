//! HLS master-playlist filter.
//!
//! Hand-rolled rather than built on `m3u8-rs`: that crate models
//! `EXT-X-MEDIA` alternatives as a single flat list shared by the whole
//! playlist, but variants here need their alternatives nested per
//! `Variant` so URI normalization and dedup-on-write can be expressed
//! directly against that structure.

mod filter;
mod model;
mod parser;
mod writer;

pub use filter::filter;
pub use model::{Alternative, AttributeList, MasterPlaylist, Variant};
