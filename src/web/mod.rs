//! HTTP ingress.
//!
//! One handler, bound to every path: a favicon short-circuit, a directive
//! parse, an upstream fetch, and a protocol-selected filter dispatch that
//! sets the response `Content-Type`.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::directive::{self, Protocol};
use crate::errors::AppError;
use crate::{dash, fetch, hls, propeller};

#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.client_timeout)
            .build()?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    Router::new()
        .fallback(handle_request)
        .layer(cors)
        .with_state(state)
}

async fn handle_request(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let path = uri.path();

    if path == "/favicon.ico" {
        return StatusCode::OK.into_response();
    }

    if method != Method::GET {
        return (StatusCode::BAD_REQUEST, "method not supported").into_response();
    }

    tracing::info!(method = %method, path, "handling request");

    match process(&state, path).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn process(state: &AppState, path: &str) -> Result<Response, AppError> {
    let (residual_path, spec) = directive::parse(path);

    let manifest_url = resolve_manifest_url(state, &residual_path).await?;
    let manifest_bytes = fetch::fetch_manifest(&state.client, &manifest_url).await?;

    let (content_type, body) = match spec.protocol {
        Protocol::Hls => (
            "application/x-mpegURL",
            hls::filter(&spec, &manifest_bytes, &manifest_url)?,
        ),
        Protocol::Dash => (
            "application/dash+xml",
            dash::filter(&spec, &manifest_bytes, &manifest_url)?,
        ),
        Protocol::Unknown => return Err(AppError::UnsupportedProtocol),
    };

    Ok(([("Content-Type", content_type)], body).into_response())
}

async fn resolve_manifest_url(state: &AppState, residual_path: &str) -> Result<String, AppError> {
    if propeller::is_propeller_path(residual_path) {
        if let (Some(propeller_host), Some((org_id, channel_id))) = (
            state.config.propeller_host.as_deref(),
            propeller::parse_propeller_path(residual_path),
        ) {
            return propeller::resolve_playback_url(&state.client, propeller_host, &org_id, &channel_id).await;
        }
    }

    let origin_host = state.config.origin_host.as_deref().unwrap_or_default();
    Ok(format!("{origin_host}{residual_path}"))
}
