//! REST helpers for the service registry and the Alith assistant.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning [`ApiError::Unavailable`] since these
//! endpoints are only called from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every helper returns `Result<_, ApiError>`; non-2xx statuses are mapped
//! through [`ApiError::from_status`] so a 404 on a detail fetch arrives as
//! `NotFound` rather than a generic failure.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;

use super::error::ApiError;
use super::types::{
    AlithExecuteRequest, AlithExecuteResponse, AlithQueryRequest, AlithQueryResponse, ListQuery, Service,
    ServiceUpdate, SubmissionPayload,
};

/// Prefix shared by every backend route.
pub const API_BASE: &str = "/api/v1";

#[cfg(any(test, feature = "hydrate"))]
fn services_endpoint() -> String {
    format!("{API_BASE}/services")
}

#[cfg(any(test, feature = "hydrate"))]
fn service_endpoint(id: &str) -> String {
    format!("{API_BASE}/services/{id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn alith_endpoint(action: &str) -> String {
    format!("{API_BASE}/alith/{action}")
}

/// The creation side of the registry, injectable so the form workflow can be
/// driven against a fake in tests.
#[async_trait(?Send)]
pub trait ServiceRegistry {
    /// Issue exactly one creation request for `payload`.
    async fn create_service(&self, payload: &SubmissionPayload) -> Result<(), ApiError>;
}

/// Registry backed by the real HTTP endpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpRegistry;

#[async_trait(?Send)]
impl ServiceRegistry for HttpRegistry {
    async fn create_service(&self, payload: &SubmissionPayload) -> Result<(), ApiError> {
        create_service(payload).await
    }
}

/// `POST /api/v1/services`. Any 2xx counts as success; the body is ignored.
///
/// # Errors
///
/// Returns [`ApiError::NetworkFailure`] on transport failure or non-2xx status.
pub async fn create_service(payload: &SubmissionPayload) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&services_endpoint())
            .json(payload)
            .map_err(ApiError::transport)?
            .send()
            .await
            .map_err(ApiError::transport)?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status(), "create service"));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = payload;
        Err(ApiError::Unavailable)
    }
}

/// `GET /api/v1/services` with optional filters.
///
/// # Errors
///
/// Returns an error on transport failure, non-2xx status, or an unexpected body.
pub async fn list_services(query: &ListQuery) -> Result<Vec<Service>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&services_endpoint())
            .query(query.pairs())
            .send()
            .await
            .map_err(ApiError::transport)?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status(), "fetch services"));
        }
        resp.json::<Vec<Service>>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = query;
        Err(ApiError::Unavailable)
    }
}

/// `GET /api/v1/services/{id}`.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for an unknown id, otherwise as [`list_services`].
pub async fn fetch_service(id: &str) -> Result<Service, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&service_endpoint(id))
            .send()
            .await
            .map_err(ApiError::transport)?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status(), "fetch service"));
        }
        resp.json::<Service>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err(ApiError::Unavailable)
    }
}

/// `PUT /api/v1/services/{id}` with a partial update; returns the stored record.
///
/// # Errors
///
/// Returns an error on transport failure, non-2xx status, or an unexpected body.
pub async fn update_service(id: &str, update: &ServiceUpdate) -> Result<Service, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::put(&service_endpoint(id))
            .json(update)
            .map_err(ApiError::transport)?
            .send()
            .await
            .map_err(ApiError::transport)?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status(), "update service"));
        }
        resp.json::<Service>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, update);
        Err(ApiError::Unavailable)
    }
}

/// `DELETE /api/v1/services/{id}`.
///
/// # Errors
///
/// Returns an error on transport failure or non-2xx status.
pub async fn delete_service(id: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::delete(&service_endpoint(id))
            .send()
            .await
            .map_err(ApiError::transport)?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status(), "delete service"));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err(ApiError::Unavailable)
    }
}

/// `POST /api/v1/alith/query`.
///
/// # Errors
///
/// Returns an error on transport failure, non-2xx status, or an unexpected body.
pub async fn alith_query(request: &AlithQueryRequest) -> Result<AlithQueryResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&alith_endpoint("query"))
            .json(request)
            .map_err(ApiError::transport)?
            .send()
            .await
            .map_err(ApiError::transport)?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status(), "alith query"));
        }
        resp.json::<AlithQueryResponse>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(ApiError::Unavailable)
    }
}

/// `POST /api/v1/alith/execute`.
///
/// # Errors
///
/// Returns an error on transport failure, non-2xx status, or an unexpected body.
pub async fn alith_execute(request: &AlithExecuteRequest) -> Result<AlithExecuteResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&alith_endpoint("execute"))
            .json(request)
            .map_err(ApiError::transport)?
            .send()
            .await
            .map_err(ApiError::transport)?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status(), "alith execute"));
        }
        resp.json::<AlithExecuteResponse>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(ApiError::Unavailable)
    }
}
