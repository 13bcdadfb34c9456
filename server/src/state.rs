//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds one pooled HTTP client for forwarding and the backend origin.

use std::sync::Arc;

use crate::config::HostConfig;

#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    /// Backend origin requests are forwarded to, e.g. `http://127.0.0.1:8000`.
    pub upstream: Arc<str>,
}

impl AppState {
    /// Build the forwarding client from host config.
    ///
    /// Redirects are passed back to the browser rather than followed.
    ///
    /// # Errors
    ///
    /// Returns the builder error if the TLS backend cannot be initialised.
    pub fn new(config: &HostConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { http, upstream: Arc::from(config.api_upstream_url.as_str()) })
    }
}
