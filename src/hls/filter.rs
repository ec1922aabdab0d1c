//! HLS master-playlist filter.
//!
//! Absolutizes the variant URI and every alternative's URI, then applies
//! the bandwidth gate, then the codec gate: an allow-list keyed on the
//! three families in [`crate::codec`].

use url::Url;

use crate::bandwidth::is_active_range;
use crate::codec::family_contains;
use crate::directive::FilterSpec;
use crate::errors::AppError;

use super::model::{Alternative, MasterPlaylist, Variant};
use super::{parser, writer};

/// Filter an HLS master playlist per `spec`, fetched from `manifest_url`,
/// returning the rewritten playlist bytes.
pub fn filter(spec: &FilterSpec, manifest_bytes: &[u8], manifest_url: &str) -> Result<Vec<u8>, AppError> {
    let content = std::str::from_utf8(manifest_bytes)
        .map_err(|e| AppError::manifest_parse(e.to_string()))?;
    let mut playlist = parser::parse(content)?;

    let base = Url::parse(manifest_url)?.join(".")?;
    normalize_uris(&mut playlist, &base)?;

    playlist.variants.retain(|variant| {
        passes_bandwidth_gate(spec, variant) && passes_codec_gate(spec, variant)
    });

    Ok(writer::write(&playlist).into_bytes())
}

fn normalize_uris(playlist: &mut MasterPlaylist, base: &Url) -> Result<(), AppError> {
    for variant in &mut playlist.variants {
        let normalized = normalize_uri(&variant.uri, base)?;
        variant.set_uri(&normalized);
        for alternative in &mut variant.alternatives {
            normalize_alternative_uri(alternative, base)?;
        }
    }
    Ok(())
}

fn normalize_alternative_uri(alternative: &mut Alternative, base: &Url) -> Result<(), AppError> {
    let Some(uri) = alternative.uri() else {
        return Ok(());
    };
    let normalized = normalize_uri(&uri, base)?;
    alternative.set_uri(&normalized);
    Ok(())
}

/// Leave an empty or already-absolute URI unchanged; resolve a relative one
/// against `base`. A URI that is neither absolute nor resolvable is a
/// terminal error (no partial playlist is ever emitted).
fn normalize_uri(uri: &str, base: &Url) -> Result<String, AppError> {
    if uri.is_empty() {
        return Ok(uri.to_string());
    }
    match Url::parse(uri) {
        Ok(_) => Ok(uri.to_string()),
        Err(_) => Ok(base.join(uri)?.to_string()),
    }
}

fn passes_bandwidth_gate(spec: &FilterSpec, variant: &Variant) -> bool {
    if !is_active_range(spec.min_bitrate, spec.max_bitrate) {
        return true;
    }
    match variant.bandwidth() {
        Some(bandwidth) => bandwidth >= spec.min_bitrate && bandwidth <= spec.max_bitrate,
        None => true,
    }
}

fn passes_codec_gate(spec: &FilterSpec, variant: &Variant) -> bool {
    let codecs = variant.codecs();
    passes_family_gate(&codecs, spec.videos.as_deref(), crate::codec::is_video)
        && passes_family_gate(&codecs, spec.audios.as_deref(), crate::codec::is_audio)
        && passes_family_gate(&codecs, spec.caption_types.as_deref(), crate::codec::is_caption)
}

/// A variant matches family `F`'s allow-list filter iff every codec of
/// family `F` it carries belongs to one of the requested tokens, vacuously
/// passing when it carries none. `requested = None` disables the filter.
fn passes_family_gate(codecs: &[String], requested: Option<&[String]>, is_family: fn(&str) -> bool) -> bool {
    let Some(requested) = requested else {
        return true;
    };
    let family_codecs: Vec<&String> = codecs.iter().filter(|c| is_family(c)).collect();
    if family_codecs.is_empty() {
        return true;
    }
    family_codecs
        .iter()
        .any(|codec| requested.iter().any(|token| family_contains(codec, token)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASTER: &str = "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=2000000,CODECS=\"avc1.640028,mp4a.40.2\"\n720p.m3u8\n#EXT-X-STREAM-INF:BANDWIDTH=800000,CODECS=\"hvc1.2.4.L93.90\"\n360p.m3u8\n";

    #[test]
    fn default_spec_is_identity_up_to_absolutization() {
        let spec = FilterSpec::default();
        let out = filter(&spec, MASTER.as_bytes(), "http://h/to/the/manifest.m3u8").unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("http://h/to/the/720p.m3u8"));
        assert!(out.contains("http://h/to/the/360p.m3u8"));
    }

    #[test]
    fn bandwidth_gate_drops_variants_outside_range() {
        let spec = FilterSpec {
            min_bitrate: 1_000_000,
            max_bitrate: 3_000_000,
            ..Default::default()
        };
        let out = filter(&spec, MASTER.as_bytes(), "http://h/to/the/manifest.m3u8").unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("720p.m3u8"));
        assert!(!out.contains("360p.m3u8"));
    }

    #[test]
    fn codec_allow_list_keeps_only_matching_family() {
        let spec = FilterSpec {
            videos: Some(vec!["avc".to_string()]),
            ..Default::default()
        };
        let out = filter(&spec, MASTER.as_bytes(), "http://h/to/the/manifest.m3u8").unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("720p.m3u8"));
        assert!(!out.contains("360p.m3u8"));
    }

    #[test]
    fn rendition_playlist_is_rejected() {
        let media = "#EXTM3U\n#EXT-X-TARGETDURATION:6\n#EXTINF:6.0,\nseg0.ts\n";
        let spec = FilterSpec::default();
        assert!(matches!(
            filter(&spec, media.as_bytes(), "http://h/a.m3u8"),
            Err(AppError::ManifestType)
        ));
    }

    #[test]
    fn variant_without_codecs_passes_any_codec_filter() {
        let master = "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=500000\nlow.m3u8\n";
        let spec = FilterSpec {
            videos: Some(vec!["avc".to_string()]),
            ..Default::default()
        };
        let out = filter(&spec, master.as_bytes(), "http://h/a.m3u8").unwrap();
        assert!(String::from_utf8(out).unwrap().contains("low.m3u8"));
    }
}
