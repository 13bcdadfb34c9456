//! Shared wire DTOs for the service registry and Alith endpoints.
//!
//! DESIGN
//! ======
//! Enumerated form values serialize to the exact strings the registry stores.
//! Listing records keep `pricing_model`/`currency` as plain strings because the
//! backend may hold values this UI never offers for new registrations.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Billing scheme offered for a new service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    #[default]
    PerCall,
    Subscription,
    UsageBased,
    Free,
}

impl PricingModel {
    pub const ALL: [Self; 4] = [Self::PerCall, Self::Subscription, Self::UsageBased, Self::Free];

    /// Wire value, also used as the `<option>` value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PerCall => "per_call",
            Self::Subscription => "subscription",
            Self::UsageBased => "usage_based",
            Self::Free => "free",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PerCall => "Per Call",
            Self::Subscription => "Subscription",
            Self::UsageBased => "Usage Based",
            Self::Free => "Free",
        }
    }

    #[must_use]
    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == raw)
    }
}

/// Settlement currency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eth,
    Metis,
    Usdc,
    Usdt,
}

impl Currency {
    pub const ALL: [Self; 4] = [Self::Eth, Self::Metis, Self::Usdc, Self::Usdt];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eth => "ETH",
            Self::Metis => "METIS",
            Self::Usdc => "USDC",
            Self::Usdt => "USDT",
        }
    }

    #[must_use]
    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == raw)
    }
}

/// Marketplace category a service is listed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "AI/ML")]
    AiMl,
    Data,
    Finance,
    Weather,
    Translation,
    #[serde(rename = "Image Processing")]
    ImageProcessing,
    Authentication,
    Other,
}

impl Category {
    pub const ALL: [Self; 8] = [
        Self::AiMl,
        Self::Data,
        Self::Finance,
        Self::Weather,
        Self::Translation,
        Self::ImageProcessing,
        Self::Authentication,
        Self::Other,
    ];

    /// Wire value; doubles as the display label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AiMl => "AI/ML",
            Self::Data => "Data",
            Self::Finance => "Finance",
            Self::Weather => "Weather",
            Self::Translation => "Translation",
            Self::ImageProcessing => "Image Processing",
            Self::Authentication => "Authentication",
            Self::Other => "Other",
        }
    }

    #[must_use]
    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == raw)
    }
}

/// Wire-ready body for `POST /api/v1/services`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubmissionPayload {
    pub name: String,
    pub description: String,
    pub endpoint_url: String,
    pub pricing_model: PricingModel,
    pub base_price: f64,
    pub currency: Currency,
    pub category: Option<Category>,
    pub tags: Vec<String>,
    pub rate_limit: u32,
    pub timeout: u32,
    pub provider_address: String,
    pub api_spec: serde_json::Value,
}

/// A registered service as returned by the registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Backend-assigned identifier; absent only on malformed rows.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub endpoint_url: String,
    pub pricing_model: String,
    pub base_price: f64,
    pub currency: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub rate_limit: u32,
    pub timeout: u32,
    pub provider_address: String,
    #[serde(default)]
    pub api_spec: Option<serde_json::Value>,
    #[serde(default)]
    pub proxy_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Partial update body for `PUT /api/v1/services/{id}`. `None` keys are omitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ServiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ServiceUpdate {
    /// True when no key would be sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Filters accepted by `GET /api/v1/services`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub provider_address: Option<String>,
    pub is_active: Option<bool>,
}

impl ListQuery {
    /// Query-string pairs in a stable order, skipping unset filters.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(skip) = self.skip {
            out.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            out.push(("limit", limit.to_string()));
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            out.push(("category", category.to_owned()));
        }
        if let Some(provider) = self.provider_address.as_deref().filter(|p| !p.is_empty()) {
            out.push(("provider_address", provider.to_owned()));
        }
        if let Some(active) = self.is_active {
            out.push(("is_active", active.to_string()));
        }
        out
    }
}

/// Body for `POST /api/v1/alith/query`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AlithQueryRequest {
    pub query: String,
    pub context: String,
    /// ISO-8601 send time.
    pub timestamp: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AlithQueryResponse {
    #[serde(default)]
    pub response: Option<String>,
}

/// Body for `POST /api/v1/alith/execute`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlithExecuteRequest {
    #[serde(rename = "serviceId")]
    pub service_id: String,
    pub parameters: serde_json::Value,
    pub context: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AlithExecuteResponse {
    #[serde(default)]
    pub result: Option<String>,
}
