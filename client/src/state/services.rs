//! Service listing and detail state.
//!
//! DESIGN
//! ======
//! Listing and detail are separate models so the detail page's edit buffer and
//! in-flight flags never leak into the list view. Both surface failures through
//! an `error` field the page renders inline.

#[cfg(test)]
#[path = "services_test.rs"]
mod services_test;

use crate::net::error::ApiError;
use crate::net::types::{Category, ListQuery, Service, ServiceUpdate};

/// Outcome of the last proxy-link copy, shown on the copy button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CopyStatus {
    #[default]
    Idle,
    Copied,
    Failed,
}

impl CopyStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Copy",
            Self::Copied => "Copied!",
            Self::Failed => "Copy failed",
        }
    }
}

/// Registry listing for the resources page.
#[derive(Clone, Debug, PartialEq)]
pub struct ServicesState {
    pub items: Vec<Service>,
    pub loading: bool,
    pub error: Option<ApiError>,
    pub category: Option<Category>,
    /// Bumped by every `start_load`; only the newest load may finish.
    pub generation: u64,
    /// Transient copy indicator for the proxy link.
    pub copy_status: CopyStatus,
    /// Bumped by every copy so an older reset timer cannot clear a newer status.
    pub copy_generation: u64,
}

impl Default for ServicesState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
            category: None,
            generation: 0,
            copy_status: CopyStatus::Idle,
            copy_generation: 0,
        }
    }
}

impl ServicesState {
    /// Listing request for the current filter.
    #[must_use]
    pub fn query(&self) -> ListQuery {
        ListQuery { category: self.category.map(|c| c.as_str().to_owned()), ..ListQuery::default() }
    }

    /// Mark a (re)load as started and return its generation.
    pub fn start_load(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.generation
    }

    /// Store the listing outcome; a failure keeps the previous items.
    /// Outcomes of superseded loads are dropped.
    pub fn finish_load(&mut self, generation: u64, result: Result<Vec<Service>, ApiError>) {
        if generation != self.generation {
            return;
        }
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(err) => self.error = Some(err),
        }
    }

    /// Record a copy outcome and return the token its reset timer must present.
    pub fn finish_copy(&mut self, copied: bool) -> u64 {
        self.copy_generation += 1;
        self.copy_status = if copied { CopyStatus::Copied } else { CopyStatus::Failed };
        self.copy_generation
    }

    /// Return the indicator to idle unless a later copy has replaced it.
    pub fn reset_copy(&mut self, token: u64) {
        if token == self.copy_generation {
            self.copy_status = CopyStatus::Idle;
        }
    }

    /// Services that can be opened or executed (have an id).
    pub fn addressable(&self) -> impl Iterator<Item = &Service> {
        self.items.iter().filter(|s| s.id.is_some())
    }
}

/// Editable subset of a service on the detail page, kept as input text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceEdits {
    pub name: String,
    pub description: String,
    pub base_price: String,
    pub rate_limit: String,
    pub timeout: String,
}

impl ServiceEdits {
    #[must_use]
    pub fn from_service(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            description: service.description.clone().unwrap_or_default(),
            base_price: service.base_price.to_string(),
            rate_limit: service.rate_limit.to_string(),
            timeout: service.timeout.to_string(),
        }
    }

    /// Partial update holding only the keys that differ from `original`.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message when a numeric input does not parse or is
    /// out of range, or when the name is blank.
    pub fn to_update(&self, original: &Service) -> Result<ServiceUpdate, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Service name is required.".to_owned());
        }
        let base_price: f64 = self
            .base_price
            .trim()
            .parse()
            .ok()
            .filter(|p: &f64| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| "Base price must be a non-negative number.".to_owned())?;
        let rate_limit: u32 = parse_positive(&self.rate_limit).ok_or_else(|| "Rate limit must be at least 1.".to_owned())?;
        let timeout: u32 = parse_positive(&self.timeout).ok_or_else(|| "Timeout must be at least 1.".to_owned())?;

        let mut update = ServiceUpdate::default();
        if name != original.name {
            update.name = Some(name.to_owned());
        }
        if self.description != original.description.clone().unwrap_or_default() {
            update.description = Some(self.description.clone());
        }
        if (base_price - original.base_price).abs() > f64::EPSILON {
            update.base_price = Some(base_price);
        }
        if rate_limit != original.rate_limit {
            update.rate_limit = Some(rate_limit);
        }
        if timeout != original.timeout {
            update.timeout = Some(timeout);
        }
        Ok(update)
    }
}

fn parse_positive(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|v| *v >= 1)
}

/// Single-service view with inline edit and delete.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceDetailState {
    pub service: Option<Service>,
    pub loading: bool,
    pub error: Option<ApiError>,
    pub edits: ServiceEdits,
    pub editing: bool,
    pub updating: bool,
    pub deleting: bool,
    /// Inline feedback for update/delete (success or failure text).
    pub notice: Option<String>,
}

impl Default for ServiceDetailState {
    fn default() -> Self {
        Self {
            service: None,
            loading: true,
            error: None,
            edits: ServiceEdits::default(),
            editing: false,
            updating: false,
            deleting: false,
            notice: None,
        }
    }
}

impl ServiceDetailState {
    /// Store the fetch outcome and seed the edit buffer.
    pub fn finish_load(&mut self, result: Result<Service, ApiError>) {
        self.loading = false;
        match result {
            Ok(service) => {
                self.edits = ServiceEdits::from_service(&service);
                self.service = Some(service);
                self.error = None;
            }
            Err(err) => {
                self.service = None;
                self.error = Some(err);
            }
        }
    }

    /// Whether any mutating request is in flight.
    #[must_use]
    pub fn busy(&self) -> bool {
        self.updating || self.deleting
    }

    /// Store the update outcome. In-flight flag always clears.
    pub fn finish_update(&mut self, result: Result<Service, ApiError>) {
        self.updating = false;
        match result {
            Ok(service) => {
                self.edits = ServiceEdits::from_service(&service);
                self.service = Some(service);
                self.editing = false;
                self.notice = Some("Service updated successfully!".to_owned());
            }
            Err(err) => self.notice = Some(format!("Failed to update service: {err}")),
        }
    }

    /// Store a delete failure. Success navigates away, so only failures land here.
    pub fn fail_delete(&mut self, err: &ApiError) {
        self.deleting = false;
        self.notice = Some(format!("Failed to delete service: {err}"));
    }
}

/// Price line shown on cards and the detail header, e.g. `0.5 ETH / per call`.
#[must_use]
pub fn price_label(service: &Service) -> String {
    format!("{} {} / {}", service.base_price, service.currency, service.pricing_model.replace('_', " "))
}

/// Text for the delete confirmation dialog.
#[must_use]
pub fn delete_confirmation(name: &str) -> String {
    format!("Are you sure you want to delete \"{name}\"? This action cannot be undone.")
}
