//! Upstream manifest fetcher.
//!
//! A thin wrapper over a shared, timeout-configured `reqwest::Client`.
//! Any response status code `>= 400` is treated as a fetch failure, not
//! just a transport error.

use crate::errors::AppError;

/// Fetch the bytes at `url`, treating a transport error or a `>= 400`
/// response status as [`AppError::UpstreamFetch`].
pub async fn fetch_manifest(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, AppError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;
    if status.as_u16() >= 400 {
        return Err(AppError::upstream_fetch(format!(
            "fetching manifest: returning http status of {status}"
        )));
    }
    Ok(bytes.to_vec())
}
