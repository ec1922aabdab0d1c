//! Propeller origin resolver.
//!
//! Resolves a `/propeller/<orgId>/<channelId>...` residual path to a
//! playback URL, standing in for a direct origin URL. Hits `GET
//! {propeller_host}/v1/organizations/{orgId}/channels/{channelId}`, which
//! returns a JSON object with a `url` field.

use serde::Deserialize;

use crate::errors::AppError;

#[derive(Debug, Deserialize)]
struct ChannelResponse {
    url: String,
}

/// Does `path` look like a Propeller-routed request
/// (`/propeller/<orgId>/<channelId>...`)?
pub fn is_propeller_path(path: &str) -> bool {
    path.trim_start_matches('/').starts_with("propeller/")
}

/// Split a Propeller-routed residual path into `(orgId, channelId)`.
/// `channelId` is taken up to its first `.`.
pub fn parse_propeller_path(path: &str) -> Option<(String, String)> {
    let mut parts = path.trim_start_matches('/').splitn(3, '/');
    let marker = parts.next()?;
    if marker != "propeller" {
        return None;
    }
    let org_id = parts.next()?.to_string();
    let channel_segment = parts.next()?;
    let channel_id = channel_segment.split('.').next()?.to_string();
    Some((org_id, channel_id))
}

/// Resolve a Propeller organization/channel pair to its playback URL.
pub async fn resolve_playback_url(
    client: &reqwest::Client,
    propeller_host: &str,
    org_id: &str,
    channel_id: &str,
) -> Result<String, AppError> {
    let url = format!("{propeller_host}/v1/organizations/{org_id}/channels/{channel_id}");
    let response = client.get(&url).send().await?;
    if response.status().as_u16() >= 400 {
        return Err(AppError::upstream_fetch(format!(
            "fetching propeller channel: returning http status of {}",
            response.status()
        )));
    }
    let channel: ChannelResponse = response.json().await?;
    Ok(channel.url)
}
