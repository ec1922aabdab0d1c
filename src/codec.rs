//! Shared codec taxonomy.
//!
//! Codec strings in manifests are profile-decorated (`avc1.640028`,
//! `hev1.1.4.L120.90`). Every predicate here is substring containment
//! against a small, well-known family vocabulary rather than a full
//! MIME-codec parser, which covers every case the filter pipeline needs.

const VIDEO_FAMILIES: [&str; 3] = ["hvc", "avc", "dvh"];
const AUDIO_FAMILIES: [&str; 3] = ["mp4a", "ec-3", "ac-3"];
const CAPTION_FAMILIES: [&str; 2] = ["stpp", "wvtt"];

/// Does `codec` belong to `family`? Family membership is substring
/// containment, e.g. `"hvc1.2.4.L93.90"` contains `"hvc"`.
pub fn family_contains(codec: &str, family: &str) -> bool {
    codec.contains(family)
}

/// Does `codec` belong to any of the known audio families
/// (`mp4a`, `ec-3`, `ac-3`)?
pub fn is_audio(codec: &str) -> bool {
    AUDIO_FAMILIES.iter().any(|f| family_contains(codec, f))
}

/// Does `codec` belong to any of the known video families
/// (`hvc`, `avc`, `dvh`)?
pub fn is_video(codec: &str) -> bool {
    VIDEO_FAMILIES.iter().any(|f| family_contains(codec, f))
}

/// Does `codec` belong to any of the known caption families
/// (`stpp`, `wvtt`)?
pub fn is_caption(codec: &str) -> bool {
    CAPTION_FAMILIES.iter().any(|f| family_contains(codec, f))
}
