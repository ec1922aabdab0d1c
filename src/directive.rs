//! URL-embedded filter-directive parser.
//!
//! Consumes a request path that interleaves directive segments
//! (`key(body)`) with the segments of the residual manifest path, and
//! produces a [`FilterSpec`] plus that residual path.

use std::sync::LazyLock;

use regex::Regex;

/// Manifest protocol, detected from the original request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    Unknown,
    Hls,
    Dash,
}

/// A stream type that can be dropped wholesale via the `fs(...)` directive,
/// or matched against a DASH `AdaptationSet`'s `contentType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamType {
    Video,
    Audio,
    Text,
}

impl StreamType {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "video" => Some(Self::Video),
            "audio" => Some(Self::Audio),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Text => "text",
        }
    }
}

/// Immutable filter directives extracted from a request URL. Has no
/// identity and is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub protocol: Protocol,
    /// `None` means "do not filter video codecs"; `Some(vec![])` means "drop
    /// every variant/representation that declares a video codec". Same
    /// present-vs-absent distinction as `caption_types`.
    pub videos: Option<Vec<String>>,
    pub audios: Option<Vec<String>>,
    /// `None` means "do not filter captions"; `Some(vec![])` means "drop
    /// all captions". This distinction must survive the parse.
    pub caption_types: Option<Vec<String>>,
    pub audio_languages: Vec<String>,
    pub caption_languages: Vec<String>,
    pub filter_stream_types: Vec<StreamType>,
    pub min_bitrate: i64,
    pub max_bitrate: i64,
    pub role: String,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            protocol: Protocol::Unknown,
            videos: None,
            audios: None,
            caption_types: None,
            audio_languages: Vec::new(),
            caption_languages: Vec::new(),
            filter_stream_types: Vec::new(),
            min_bitrate: 0,
            max_bitrate: i32::MAX as i64,
            role: String::new(),
        }
    }
}

static DIRECTIVE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\((.*)\)$").expect("static directive regex is valid"));

/// Expand the `hdr10` shorthand into its two concrete codec tokens, in
/// order, and pass every other token through unchanged.
fn expand_video_token(token: &str, out: &mut Vec<String>) {
    if token == "hdr10" {
        out.push("hev1.2".to_string());
        out.push("hvc1.2".to_string());
    } else {
        out.push(token.to_string());
    }
}

/// Parse a comma-separated list, skipping directive bodies that are empty
/// (so `ct()` both creates and leaves the list empty, rather than
/// appending a spurious `""` entry).
fn split_list(body: &str) -> Vec<&str> {
    if body.is_empty() {
        Vec::new()
    } else {
        body.split(',').collect()
    }
}

/// Parse a `(min,max)` bitrate token independently: an empty token leaves
/// the field untouched; a non-empty token is parsed as an integer, with a
/// malformed one tolerated by falling back to `0`.
fn parse_bitrate_token(token: &str) -> Option<i64> {
    if token.is_empty() {
        None
    } else {
        Some(token.parse::<i64>().unwrap_or(0))
    }
}

/// Parse a request path into its residual manifest path and the
/// [`FilterSpec`] encoded by its directive segments. This parser never
/// fails: unrecognized keys and malformed bodies simply contribute no
/// filter, leaving the rest of the spec at its defaults.
pub fn parse(path: &str) -> (String, FilterSpec) {
    let mut spec = FilterSpec::default();

    if path.contains(".m3u8") {
        spec.protocol = Protocol::Hls;
    } else if path.contains(".mpd") {
        spec.protocol = Protocol::Dash;
    }

    let mut residual_segments = Vec::new();

    for segment in path.split('/') {
        let Some(captures) = DIRECTIVE_SEGMENT.captures(segment) else {
            residual_segments.push(segment);
            continue;
        };

        let key = &captures[1];
        let body = &captures[2];

        match key {
            "v" => {
                let list = spec.videos.get_or_insert_with(Vec::new);
                for token in split_list(body) {
                    expand_video_token(token, list);
                }
            }
            "a" => {
                let list = spec.audios.get_or_insert_with(Vec::new);
                for token in split_list(body) {
                    list.push(token.to_string());
                }
            }
            "al" => {
                for token in split_list(body) {
                    spec.audio_languages.push(token.to_string());
                }
            }
            "c" => {
                for token in split_list(body) {
                    spec.caption_languages.push(token.to_string());
                }
            }
            "ct" => {
                let list = spec.caption_types.get_or_insert_with(Vec::new);
                for token in split_list(body) {
                    list.push(token.to_string());
                }
            }
            "fs" => {
                for token in split_list(body) {
                    if let Some(stream_type) = StreamType::parse(token) {
                        spec.filter_stream_types.push(stream_type);
                    }
                }
            }
            "b" => {
                let tokens: Vec<&str> = body.split(',').collect();
                if let Some(min_token) = tokens.first() {
                    if let Some(min) = parse_bitrate_token(min_token) {
                        spec.min_bitrate = min;
                    }
                }
                if let Some(max_token) = tokens.get(1) {
                    if let Some(max) = parse_bitrate_token(max_token) {
                        spec.max_bitrate = max;
                    }
                }
            }
            _ => {
                // Unknown directive key: forward-compatible no-op.
            }
        }
    }

    let residual_path = residual_segments.join("/");
    (residual_path, spec)
}
