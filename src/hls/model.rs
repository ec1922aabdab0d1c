//! HLS master-playlist data model.
//!
//! `Variant` and `Alternative` keep their full attribute list as an ordered
//! `(key, value)` vector rather than modeling every possible HLS attribute,
//! so a round trip preserves fields the filter never inspects (RESOLUTION,
//! FRAME-RATE, NAME, LANGUAGE, DEFAULT, ...) exactly as the origin sent
//! them. Only the handful of attributes the filter pipeline reads
//! (BANDWIDTH, CODECS, the alternative-rendition group references) get
//! typed accessors.

/// An ordered HLS attribute list, e.g. the text following `#EXT-X-STREAM-INF:`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeList(Vec<(String, String)>);

impl AttributeList {
    /// Split `text` on top-level commas (commas inside `"..."` don't split)
    /// and each resulting token on its first `=`.
    pub fn parse(text: &str) -> Self {
        let mut attrs = Vec::new();
        let mut in_quotes = false;
        let mut start = 0;
        let bytes = text.as_bytes();
        for (i, &b) in bytes.iter().enumerate() {
            match b {
                b'"' => in_quotes = !in_quotes,
                b',' if !in_quotes => {
                    push_token(&text[start..i], &mut attrs);
                    start = i + 1;
                }
                _ => {}
            }
        }
        push_token(&text[start..], &mut attrs);
        Self(attrs)
    }

    /// The raw value text for `key` (quotes included, if any).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// The value for `key` with surrounding `"..."` stripped.
    pub fn get_unquoted(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.trim_matches('"').to_string())
    }

    /// Replace `key`'s value (preserving its position), or append it.
    pub fn set_quoted(&mut self, key: &str, value: &str) {
        let quoted = format!("\"{value}\"");
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
            entry.1 = quoted;
        } else {
            self.0.push((key.to_string(), quoted));
        }
    }

    pub fn to_line(&self, tag: &str) -> String {
        let body = self
            .0
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(",");
        format!("#{tag}:{body}")
    }
}

fn push_token(token: &str, out: &mut Vec<(String, String)>) {
    if let Some(eq) = token.find('=') {
        let key = token[..eq].trim().to_string();
        let value = token[eq + 1..].trim().to_string();
        if !key.is_empty() {
            out.push((key, value));
        }
    }
}

/// A single `#EXT-X-MEDIA` alternative rendition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternative {
    pub attributes: AttributeList,
}

impl Alternative {
    pub fn group_id(&self) -> Option<String> {
        self.attributes.get_unquoted("GROUP-ID")
    }

    pub fn media_type(&self) -> Option<String> {
        self.attributes.get_unquoted("TYPE")
    }

    pub fn uri(&self) -> Option<String> {
        self.attributes.get_unquoted("URI")
    }

    pub fn set_uri(&mut self, uri: &str) {
        self.attributes.set_quoted("URI", uri);
    }

    pub fn to_line(&self) -> String {
        self.attributes.to_line("EXT-X-MEDIA")
    }
}

/// A single `#EXT-X-STREAM-INF` variant plus the URI line that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub attributes: AttributeList,
    pub uri: String,
    pub alternatives: Vec<Alternative>,
}

impl Variant {
    pub fn bandwidth(&self) -> Option<i64> {
        self.attributes
            .get_unquoted("BANDWIDTH")
            .and_then(|v| v.parse().ok())
    }

    pub fn codecs(&self) -> Vec<String> {
        match self.attributes.get_unquoted("CODECS") {
            Some(raw) => raw.split(',').map(|c| c.trim().to_string()).collect(),
            None => Vec::new(),
        }
    }

    pub fn set_uri(&mut self, uri: &str) {
        self.uri = uri.to_string();
    }

    pub fn stream_inf_line(&self) -> String {
        self.attributes.to_line("EXT-X-STREAM-INF")
    }
}

/// A parsed HLS master playlist: everything that isn't a variant or
/// alternative tag is kept verbatim in `preamble` and re-emitted first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterPlaylist {
    pub preamble: Vec<String>,
    pub variants: Vec<Variant>,
}
