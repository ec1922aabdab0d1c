//! Property-based checks of the filter pipeline's universal invariants.

use proptest::prelude::*;

use manifest_gateway::bandwidth::is_active_range;
use manifest_gateway::{dash, hls, FilterSpec};

#[test]
fn is_active_range_false_at_default_bounds() {
    assert!(!is_active_range(0, i32::MAX as i64));
}

proptest! {
    #[test]
    fn is_active_range_false_on_inverted_negative_or_overflowed(min in -10_000i64..10_000, max in -10_000i64..(i32::MAX as i64 + 10_000)) {
        if min >= max || min < 0 || max > i32::MAX as i64 {
            prop_assert!(!is_active_range(min, max));
        }
    }

    #[test]
    fn hls_default_spec_is_identity_up_to_absolutization(bandwidth in 1u32..50_000_000) {
        let playlist = format!(
            "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH={bandwidth}\nvariant.m3u8\n"
        );
        let spec = FilterSpec::default();
        let out = hls::filter(&spec, playlist.as_bytes(), "http://h/a/master.m3u8").unwrap();
        let out = String::from_utf8(out).unwrap();
        prop_assert!(out.contains("http://h/a/variant.m3u8"));
    }

    #[test]
    fn hls_absolutization_is_idempotent(bandwidth in 1u32..50_000_000) {
        let playlist = format!(
            "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH={bandwidth}\nhttp://h/a/variant.m3u8\n"
        );
        let spec = FilterSpec::default();
        let once = hls::filter(&spec, playlist.as_bytes(), "http://h/a/master.m3u8").unwrap();
        let twice = hls::filter(&spec, &once, "http://h/a/master.m3u8").unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn hls_variant_without_codecs_survives_any_codec_filter(family in "(avc|hvc|dvh|mp4a)") {
        let playlist = "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=1000\nno-codecs.m3u8\n";
        let spec = FilterSpec {
            videos: Some(vec![family]),
            ..Default::default()
        };
        let out = hls::filter(&spec, playlist.as_bytes(), "http://h/a/master.m3u8").unwrap();
        prop_assert!(String::from_utf8(out).unwrap().contains("no-codecs.m3u8"));
    }

    #[test]
    fn dash_representation_without_codecs_survives_any_codec_filter(family in "(avc|hvc|dvh)") {
        let mpd = r#"<MPD><Period id="0"><AdaptationSet id="0" contentType="video"><Representation id="0" bandwidth="1000"/></AdaptationSet></Period></MPD>"#;
        let spec = FilterSpec {
            videos: Some(vec![family]),
            ..Default::default()
        };
        let out = dash::filter(&spec, mpd.as_bytes(), "http://h/a/manifest.mpd").unwrap();
        prop_assert!(String::from_utf8(out).unwrap().contains(r#"Representation id="0""#));
    }

    #[test]
    fn dash_period_and_set_ids_equal_their_index_after_filtering(period_count in 1usize..6, set_count in 1usize..6) {
        let mut mpd = String::from("<MPD>");
        for p in 0..period_count {
            mpd.push_str(&format!(r#"<Period id="p{p}">"#));
            for s in 0..set_count {
                mpd.push_str(&format!(
                    r#"<AdaptationSet id="s{s}" contentType="audio"><Representation id="0" bandwidth="1000"/></AdaptationSet>"#
                ));
            }
            mpd.push_str("</Period>");
        }
        mpd.push_str("</MPD>");

        let spec = FilterSpec {
            min_bitrate: 0,
            max_bitrate: 2000,
            ..Default::default()
        };
        let out = dash::filter(&spec, mpd.as_bytes(), "http://h/a/manifest.mpd").unwrap();
        let out = String::from_utf8(out).unwrap();
        let mpd: manifest_gateway::dash::Mpd = quick_xml::de::from_str(&out).unwrap();

        for (index, period) in mpd.periods.iter().enumerate() {
            prop_assert_eq!(&period.id, &index.to_string());
            for (set_index, set) in period.adaptation_sets.iter().enumerate() {
                prop_assert_eq!(&set.id, &set_index.to_string());
            }
        }
    }
}
