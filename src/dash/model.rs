//! DASH MPD data model.
//!
//! Serde structs for `quick-xml`, attributes prefixed with `@` per that
//! crate's convention. Only the elements the filter pipeline touches are
//! modeled; unknown child elements and attributes are not preserved, so
//! this is not a general-purpose MPD round-trip model.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename = "MPD")]
pub struct Mpd {
    #[serde(rename = "@xmlns", skip_serializing_if = "Option::is_none")]
    pub xmlns: Option<String>,
    #[serde(rename = "@profiles", skip_serializing_if = "Option::is_none")]
    pub profiles: Option<String>,
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    pub mpd_type: Option<String>,
    #[serde(rename = "@minBufferTime", skip_serializing_if = "Option::is_none")]
    pub min_buffer_time: Option<String>,
    #[serde(rename = "@mediaPresentationDuration", skip_serializing_if = "Option::is_none")]
    pub media_presentation_duration: Option<String>,
    #[serde(rename = "BaseURL", default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<BaseUrl>,
    #[serde(rename = "Period", default)]
    pub periods: Vec<Period>,
}

/// A `<BaseURL>...</BaseURL>` element. Modeled as a wrapper (rather than a
/// bare `String` field) because quick-xml's serde bridge needs the
/// `$value` marker to bind an element's text content.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BaseUrl {
    #[serde(rename = "$value")]
    pub value: String,
}

impl BaseUrl {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Period {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "AdaptationSet", default)]
    pub adaptation_sets: Vec<AdaptationSet>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AdaptationSet {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@contentType", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(rename = "@mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(rename = "@lang", skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(rename = "Accessibility", default)]
    pub accessibility: Vec<Accessibility>,
    #[serde(rename = "Role", default)]
    pub roles: Vec<Role>,
    #[serde(rename = "Representation", default)]
    pub representations: Vec<Representation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Representation {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@codecs", skip_serializing_if = "Option::is_none")]
    pub codecs: Option<String>,
    #[serde(rename = "@bandwidth", skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<i64>,
    #[serde(rename = "@width", skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(rename = "@height", skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Accessibility {
    #[serde(rename = "@schemeIdUri")]
    pub scheme_id_uri: String,
    #[serde(rename = "@value", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Role {
    #[serde(rename = "@schemeIdUri", skip_serializing_if = "Option::is_none")]
    pub scheme_id_uri: Option<String>,
    #[serde(rename = "@value", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}
