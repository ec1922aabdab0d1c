//! Error type definitions for the manifest gateway.
//!
//! Every error that can surface from directive parsing, manifest
//! fetching, or manifest filtering has a dedicated variant so the HTTP
//! boundary can map it to the right status code and a human context
//! message without string matching on the error's `Display`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Top-level error type for the filter pipeline and its HTTP boundary.
#[derive(Error, Debug)]
pub enum AppError {
    /// Reserved for a future stricter directive grammar. The parser
    /// described by this crate is total and never raises this variant.
    #[error("{0}")]
    DirectiveParse(String),

    /// The upstream origin could not be reached, or responded with a
    /// status code >= 400.
    #[error("{0}")]
    UpstreamFetch(String),

    /// The manifest bytes are not a valid master HLS playlist or MPD.
    #[error("{0}")]
    ManifestParse(String),

    /// The HLS input was a rendition (media) playlist, not a master
    /// playlist. Rendition-level rewriting is out of scope.
    #[error("manifest type is wrong")]
    ManifestType,

    /// A variant URI or the manifest URL itself is not a valid URL.
    #[error("{0}")]
    Url(#[from] url::ParseError),

    /// The filtered structure could not be re-serialized. Should be
    /// unreachable if parsing succeeded.
    #[error("{0}")]
    Serialization(String),

    /// The residual manifest path matched neither `.m3u8` nor `.mpd`.
    #[error("unsupported protocol")]
    UnsupportedProtocol,
}

impl AppError {
    pub fn upstream_fetch<M: Into<String>>(message: M) -> Self {
        Self::UpstreamFetch(message.into())
    }

    pub fn manifest_parse<M: Into<String>>(message: M) -> Self {
        Self::ManifestParse(message.into())
    }

    pub fn serialization<M: Into<String>>(message: M) -> Self {
        Self::Serialization(message.into())
    }

    /// The human-readable context prefixed to every HTTP error body, e.g.
    /// `"failed fetching origin url"`.
    fn context(&self) -> &'static str {
        match self {
            AppError::DirectiveParse(_) => "failed parsing url",
            AppError::UpstreamFetch(_) => "failed fetching origin url",
            AppError::ManifestParse(_) | AppError::ManifestType | AppError::Serialization(_) => {
                "failed to filter manifest"
            }
            AppError::Url(_) => "failed to filter manifest",
            AppError::UnsupportedProtocol => "failed to select filter",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::UnsupportedProtocol => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::UpstreamFetch(err.to_string())
    }
}

impl From<quick_xml::DeError> for AppError {
    fn from(err: quick_xml::DeError) -> Self {
        Self::ManifestParse(err.to_string())
    }
}


/// Maps an [`AppError`] to its HTTP response: 400 for an unsupported
/// protocol, 500 for every other failure, always as a plain-text
/// `"<message>: <cause>"` body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        let body = format!("{}: {self}", self.context());
        (self.status(), body).into_response()
    }
}
