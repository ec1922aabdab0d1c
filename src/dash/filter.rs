//! DASH MPD filter.
//!
//! An ordered pipeline of passes over the in-memory MPD, each conditional
//! on the corresponding `FilterSpec` field being non-default: stream-type
//! pruning, bandwidth pruning, codec deny-listing, caption exact-matching,
//! and accessibility role rewriting.

use url::Url;

use crate::bandwidth::is_active_range;
use crate::codec::family_contains;
use crate::directive::{FilterSpec, StreamType};
use crate::errors::AppError;

use super::model::{BaseUrl, Mpd, Representation};
use super::renumber::{drop_empty_periods_and_renumber, renumber_adaptation_sets};

const AUDIO_PURPOSE_SCHEME: &str = "urn:tva:metadata:cs:AudioPurposeCS:2007";

pub fn filter(spec: &FilterSpec, manifest_bytes: &[u8], manifest_url: &str) -> Result<Vec<u8>, AppError> {
    let content = std::str::from_utf8(manifest_bytes)
        .map_err(|e| AppError::manifest_parse(e.to_string()))?;
    let mut mpd: Mpd = quick_xml::de::from_str(content)?;

    normalize_base_url(&mut mpd, manifest_url)?;

    if !spec.filter_stream_types.is_empty() {
        prune_stream_types(&mut mpd, &spec.filter_stream_types);
    }

    if is_active_range(spec.min_bitrate, spec.max_bitrate) {
        prune_bandwidth(&mut mpd, spec.min_bitrate, spec.max_bitrate);
    }

    if let Some(videos) = &spec.videos {
        prune_codecs_deny_list(&mut mpd, "video", videos);
    }

    if let Some(audios) = &spec.audios {
        prune_codecs_deny_list(&mut mpd, "audio", audios);
    }

    if let Some(caption_types) = &spec.caption_types {
        prune_captions_exact(&mut mpd, caption_types);
    }

    if !spec.role.is_empty() {
        rewrite_roles(&mut mpd, &spec.role);
    }

    let body = quick_xml::se::to_string(&mpd).map_err(|e| AppError::serialization(e.to_string()))?;
    Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{body}").into_bytes())
}

/// If the MPD has no `BaseURL`, set it to `manifestURL`'s directory. If it
/// has one that doesn't already look absolute, resolve it against that
/// directory. An absolute `BaseURL` is left untouched.
fn normalize_base_url(mpd: &mut Mpd, manifest_url: &str) -> Result<(), AppError> {
    let directory = Url::parse(manifest_url)?.join(".")?;
    match &mpd.base_url {
        None => mpd.base_url = Some(BaseUrl::new(directory.to_string())),
        Some(existing) if existing.value.is_empty() => {
            mpd.base_url = Some(BaseUrl::new(directory.to_string()))
        }
        Some(existing) if !existing.value.starts_with("http") => {
            mpd.base_url = Some(BaseUrl::new(directory.join(&existing.value)?.to_string()));
        }
        Some(_) => {}
    }
    Ok(())
}

fn prune_stream_types(mpd: &mut Mpd, filtered: &[StreamType]) {
    let dropped: Vec<&str> = filtered.iter().map(|t| t.as_str()).collect();
    for period in &mut mpd.periods {
        period.adaptation_sets.retain(|set| {
            !set
                .content_type
                .as_deref()
                .is_some_and(|ct| dropped.contains(&ct))
        });
        renumber_adaptation_sets(period);
    }
    drop_empty_periods_and_renumber(mpd);
}

fn prune_bandwidth(mpd: &mut Mpd, min: i64, max: i64) {
    for period in &mut mpd.periods {
        for set in &mut period.adaptation_sets {
            set.representations.retain(|rep| {
                matches!(rep.bandwidth, Some(bandwidth) if bandwidth >= min && bandwidth <= max)
            });
        }
        period.adaptation_sets.retain(|set| !set.representations.is_empty());
        renumber_adaptation_sets(period);
    }
    drop_empty_periods_and_renumber(mpd);
}

/// Deny-list codec pruning for `content_type` (`"video"` or `"audio"`):
/// drop every representation whose codec string belongs to any of the
/// requested families. A representation with no `codecs` is always kept.
fn prune_codecs_deny_list(mpd: &mut Mpd, content_type: &str, requested: &[String]) {
    for period in &mut mpd.periods {
        for set in &mut period.adaptation_sets {
            if set.content_type.as_deref() != Some(content_type) {
                continue;
            }
            set.representations.retain(|rep| !matches_any_requested(rep, requested));
        }
        period.adaptation_sets.retain(|set| !set.representations.is_empty());
        renumber_adaptation_sets(period);
    }
    drop_empty_periods_and_renumber(mpd);
}

fn matches_any_requested(rep: &Representation, requested: &[String]) -> bool {
    let Some(codecs) = &rep.codecs else {
        return false;
    };
    requested.iter().any(|token| family_contains(codecs, token))
}

/// Caption codec pruning is exact-match, keep-list, and does not drop
/// empty `AdaptationSet`s.
fn prune_captions_exact(mpd: &mut Mpd, caption_types: &[String]) {
    for period in &mut mpd.periods {
        for set in &mut period.adaptation_sets {
            if set.content_type.as_deref() != Some("text") {
                continue;
            }
            set.representations.retain(|rep| match &rep.codecs {
                None => true,
                Some(codecs) => caption_types.iter().any(|token| token == codecs),
            });
        }
    }
}

fn rewrite_roles(mpd: &mut Mpd, role: &str) {
    for period in &mut mpd.periods {
        for set in &mut period.adaptation_sets {
            for (index, accessibility) in set.accessibility.iter().enumerate() {
                if accessibility.scheme_id_uri != AUDIO_PURPOSE_SCHEME {
                    continue;
                }
                if let Some(role_entry) = set.roles.get_mut(index) {
                    role_entry.value = Some(role.to_string());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mpd_xml() -> &'static str {
        r#"<MPD><Period id="0"><AdaptationSet id="0" contentType="video"><Representation id="0" codecs="avc1.640028" bandwidth="2000000"/><Representation id="1" codecs="hvc1.2.4.L93.90" bandwidth="3000000"/></AdaptationSet><AdaptationSet id="1" contentType="text"><Representation id="0" codecs="wvtt"/></AdaptationSet></Period></MPD>"#
    }

    #[test]
    fn default_spec_only_normalizes_base_url() {
        let spec = FilterSpec::default();
        let out = filter(&spec, mpd_xml().as_bytes(), "http://h/to/the/manifest.mpd").unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("http://h/to/the/"));
        assert!(out.contains("avc1.640028"));
        assert!(out.contains("hvc1.2.4.L93.90"));
    }

    #[test]
    fn stream_type_pruning_drops_and_renumbers() {
        let spec = FilterSpec {
            filter_stream_types: vec![StreamType::Text],
            ..Default::default()
        };
        let out = filter(&spec, mpd_xml().as_bytes(), "http://h/a.mpd").unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(!out.contains("wvtt"));
        assert!(out.contains(r#"AdaptationSet id="0""#));
    }

    #[test]
    fn video_codec_deny_list_drops_matching_family() {
        let spec = FilterSpec {
            videos: Some(vec!["hvc".to_string()]),
            ..Default::default()
        };
        let out = filter(&spec, mpd_xml().as_bytes(), "http://h/a.mpd").unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("avc1.640028"));
        assert!(!out.contains("hvc1.2.4.L93.90"));
    }

    #[test]
    fn caption_exact_match_keeps_only_requested_token() {
        let spec = FilterSpec {
            caption_types: Some(vec!["stpp".to_string()]),
            ..Default::default()
        };
        let out = filter(&spec, mpd_xml().as_bytes(), "http://h/a.mpd").unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(!out.contains("wvtt"));
    }

    #[test]
    fn representation_without_codecs_survives_codec_filters() {
        let mpd = r#"<MPD><Period id="0"><AdaptationSet id="0" contentType="video"><Representation id="0" bandwidth="500000"/></AdaptationSet></Period></MPD>"#;
        let spec = FilterSpec {
            videos: Some(vec!["avc".to_string()]),
            ..Default::default()
        };
        let out = filter(&spec, mpd.as_bytes(), "http://h/a.mpd").unwrap();
        assert!(String::from_utf8(out).unwrap().contains(r#"Representation id="0""#));
    }
}
