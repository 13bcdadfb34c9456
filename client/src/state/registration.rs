//! Multi-step service registration workflow.
//!
//! DESIGN
//! ======
//! `RegistrationState` is a plain value. Every user action is a `FormEvent`
//! applied with [`RegistrationState::apply`], which returns the next state and
//! never mutates the input. Submission is split into [`RegistrationState::begin_submit`]
//! (guard + validation + payload transform) and [`RegistrationState::finish_submit`]
//! (record the typed outcome) so the page can render the in-flight phase while
//! the request is pending. [`submit`] chains both around a [`ServiceRegistry`],
//! publishing each step through a [`FormCell`].
//!
//! The draft lives exactly as long as the page that owns the signal; nothing
//! here persists it.

#[cfg(test)]
#[path = "registration_test.rs"]
mod registration_test;

use leptos::prelude::{GetUntracked, RwSignal, Set};

use crate::net::api::ServiceRegistry;
use crate::net::error::ApiError;
use crate::net::types::{Category, Currency, PricingModel, SubmissionPayload};

pub const TOTAL_STEPS: u8 = 3;

// =============================================================================
// STEP CURSOR
// =============================================================================

/// Visible form panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Step {
    /// Name, description, category, tags.
    #[default]
    Identity,
    /// Endpoint URL, rate limit, timeout, provider address, API spec.
    Technical,
    /// Pricing model, base price, currency.
    Commercial,
}

impl Step {
    pub const ALL: [Self; 3] = [Self::Identity, Self::Technical, Self::Commercial];

    /// 1-based cursor value.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Identity => 1,
            Self::Technical => 2,
            Self::Commercial => 3,
        }
    }

    #[must_use]
    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == n)
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    #[must_use]
    pub fn is_final(self) -> bool {
        self.number() == TOTAL_STEPS
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Identity => "Service Details",
            Self::Technical => "Technical Configuration",
            Self::Commercial => "Pricing & Business",
        }
    }

    #[must_use]
    pub fn subtitle(self) -> &'static str {
        match self {
            Self::Identity => "Let's start with the basic information about your service",
            Self::Technical => "Configure the technical aspects of your service",
            Self::Commercial => "Set up your pricing model and business details",
        }
    }
}

// =============================================================================
// DRAFT
// =============================================================================

/// Editable draft field, addressed by its input `name` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    EndpointUrl,
    PricingModel,
    BasePrice,
    Currency,
    Category,
    Tags,
    RateLimit,
    Timeout,
    ProviderAddress,
    ApiSpec,
}

impl Field {
    pub const ALL: [Self; 12] = [
        Self::Name,
        Self::Description,
        Self::EndpointUrl,
        Self::PricingModel,
        Self::BasePrice,
        Self::Currency,
        Self::Category,
        Self::Tags,
        Self::RateLimit,
        Self::Timeout,
        Self::ProviderAddress,
        Self::ApiSpec,
    ];

    /// Input `name` attribute and payload key.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::EndpointUrl => "endpoint_url",
            Self::PricingModel => "pricing_model",
            Self::BasePrice => "base_price",
            Self::Currency => "currency",
            Self::Category => "category",
            Self::Tags => "tags",
            Self::RateLimit => "rate_limit",
            Self::Timeout => "timeout",
            Self::ProviderAddress => "provider_address",
            Self::ApiSpec => "api_spec",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Service Name",
            Self::Description => "Description",
            Self::EndpointUrl => "Endpoint URL",
            Self::PricingModel => "Pricing Model",
            Self::BasePrice => "Base Price",
            Self::Currency => "Currency",
            Self::Category => "Category",
            Self::Tags => "Tags",
            Self::RateLimit => "Rate Limit",
            Self::Timeout => "Timeout",
            Self::ProviderAddress => "Provider Address",
            Self::ApiSpec => "API Specification",
        }
    }

    /// Fields coerced from text to a number on every edit.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::BasePrice | Self::RateLimit | Self::Timeout)
    }
}

/// In-progress registration, accumulated across all three steps.
#[derive(Clone, Debug, PartialEq)]
pub struct DraftService {
    pub name: String,
    pub description: String,
    pub endpoint_url: String,
    pub pricing_model: PricingModel,
    pub base_price: f64,
    pub currency: Currency,
    pub category: Option<Category>,
    /// Comma-delimited until submission.
    pub tags: String,
    /// Requests per minute.
    pub rate_limit: u32,
    /// Seconds.
    pub timeout: u32,
    pub provider_address: String,
    /// JSON document text until submission.
    pub api_spec: String,
    /// Numeric fields whose latest input text did not parse. The stored
    /// number is stale for these until a parseable edit arrives.
    pub unparsed: Vec<Field>,
}

impl Default for DraftService {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            endpoint_url: String::new(),
            pricing_model: PricingModel::PerCall,
            base_price: 0.0,
            currency: Currency::Eth,
            category: None,
            tags: String::new(),
            rate_limit: 10,
            timeout: 30,
            provider_address: String::new(),
            api_spec: "{}".to_owned(),
            unparsed: Vec::new(),
        }
    }
}

impl DraftService {
    /// Return a copy with exactly one field replaced by the raw input text.
    ///
    /// Numeric fields are coerced here: blank text becomes 0 and text that
    /// does not parse keeps the previous value but marks the field in
    /// `unparsed`, which blocks submission. Select fields ignore values
    /// outside their option list (an empty category clears the selection).
    #[must_use]
    pub fn with_field(&self, field: Field, raw: &str) -> Self {
        let mut next = self.clone();
        match field {
            Field::Name => next.name = raw.to_owned(),
            Field::Description => next.description = raw.to_owned(),
            Field::EndpointUrl => next.endpoint_url = raw.to_owned(),
            Field::Tags => next.tags = raw.to_owned(),
            Field::ProviderAddress => next.provider_address = raw.to_owned(),
            Field::ApiSpec => next.api_spec = raw.to_owned(),
            Field::PricingModel => {
                if let Some(model) = PricingModel::from_wire(raw) {
                    next.pricing_model = model;
                }
            }
            Field::Currency => {
                if let Some(currency) = Currency::from_wire(raw) {
                    next.currency = currency;
                }
            }
            Field::Category => next.category = Category::from_wire(raw),
            Field::BasePrice => {
                let parsed = coerce_number(raw);
                next.record_parse(field, parsed.is_some());
                next.base_price = parsed.unwrap_or(self.base_price);
            }
            Field::RateLimit => {
                let parsed = coerce_number(raw);
                next.record_parse(field, parsed.is_some());
                next.rate_limit = parsed.unwrap_or(self.rate_limit);
            }
            Field::Timeout => {
                let parsed = coerce_number(raw);
                next.record_parse(field, parsed.is_some());
                next.timeout = parsed.unwrap_or(self.timeout);
            }
        }
        next
    }

    fn record_parse(&mut self, field: Field, parsed: bool) {
        self.unparsed.retain(|f| *f != field);
        if !parsed {
            self.unparsed.push(field);
        }
    }

    /// Current value of `field` rendered back to input text.
    #[must_use]
    pub fn field_text(&self, field: Field) -> String {
        match field {
            Field::Name => self.name.clone(),
            Field::Description => self.description.clone(),
            Field::EndpointUrl => self.endpoint_url.clone(),
            Field::Tags => self.tags.clone(),
            Field::ProviderAddress => self.provider_address.clone(),
            Field::ApiSpec => self.api_spec.clone(),
            Field::PricingModel => self.pricing_model.as_str().to_owned(),
            Field::Currency => self.currency.as_str().to_owned(),
            Field::Category => self.category.map(Category::as_str).unwrap_or_default().to_owned(),
            Field::BasePrice => self.base_price.to_string(),
            Field::RateLimit => self.rate_limit.to_string(),
            Field::Timeout => self.timeout.to_string(),
        }
    }

    /// Fields that block submission: required text left blank, no category,
    /// numeric text that did not parse, or a numeric value outside its range.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<Field> {
        let mut out = Vec::new();
        let required_text = [
            (Field::Name, &self.name),
            (Field::Description, &self.description),
            (Field::EndpointUrl, &self.endpoint_url),
            (Field::ProviderAddress, &self.provider_address),
        ];
        for (field, value) in required_text {
            if value.trim().is_empty() {
                out.push(field);
            }
        }
        if self.category.is_none() {
            out.push(Field::Category);
        }
        let unparsed = |field| self.unparsed.contains(&field);
        if unparsed(Field::BasePrice) || !self.base_price.is_finite() || self.base_price < 0.0 {
            out.push(Field::BasePrice);
        }
        if unparsed(Field::RateLimit) || self.rate_limit < 1 {
            out.push(Field::RateLimit);
        }
        if unparsed(Field::Timeout) || self.timeout < 1 {
            out.push(Field::Timeout);
        }
        out
    }

    /// Transform the draft into the wire payload.
    ///
    /// Pure: identical drafts always yield identical payloads. Performs no
    /// validation beyond the JSON parse; see [`DraftService::invalid_fields`].
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::MalformedSpec`] if the API-spec text is not JSON.
    pub fn to_payload(&self) -> Result<SubmissionPayload, SubmitError> {
        Ok(SubmissionPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            endpoint_url: self.endpoint_url.clone(),
            pricing_model: self.pricing_model,
            base_price: self.base_price,
            currency: self.currency,
            category: self.category,
            tags: split_tags(&self.tags),
            rate_limit: self.rate_limit,
            timeout: self.timeout,
            provider_address: self.provider_address.clone(),
            api_spec: parse_api_spec(&self.api_spec)?,
        })
    }
}

/// `None` when the text is neither blank nor a number of type `T`.
fn coerce_number<T: std::str::FromStr + Default>(raw: &str) -> Option<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(T::default());
    }
    trimmed.parse().ok()
}

/// Split comma-delimited tags, trimming each and dropping empties.
/// Order and duplicates are preserved.
#[must_use]
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty()).map(str::to_owned).collect()
}

/// Parse the API-spec text as a JSON document.
///
/// # Errors
///
/// Returns [`SubmitError::MalformedSpec`] carrying the parser message.
pub fn parse_api_spec(raw: &str) -> Result<serde_json::Value, SubmitError> {
    serde_json::from_str(raw).map_err(|e| SubmitError::MalformedSpec(e.to_string()))
}

// =============================================================================
// ERRORS
// =============================================================================

/// Why a submit click did not produce a registered service.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SubmitError {
    /// The API-spec text is not a JSON document.
    #[error("API specification is not valid JSON: {0}")]
    MalformedSpec(String),

    /// Required fields are blank or numeric fields are out of range.
    #[error("Please complete: {}", field_labels(.0))]
    Invalid(Vec<Field>),

    /// A submission from this form is still in flight.
    #[error("a submission is already in progress")]
    AlreadySubmitting,

    /// This form already registered its service.
    #[error("service already submitted")]
    AlreadySubmitted,

    /// Submit was triggered before reaching the last step.
    #[error("finish every step before submitting")]
    NotOnFinalStep,

    /// The registry rejected the request or could not be reached.
    #[error("Failed to create service: {0}")]
    Api(#[from] ApiError),
}

fn field_labels(fields: &[Field]) -> String {
    fields.iter().map(|f| f.label()).collect::<Vec<_>>().join(", ")
}

// =============================================================================
// STATE MACHINE
// =============================================================================

/// Where the form is in its submit lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Editing,
    /// A creation request is in flight; the submit control is inert.
    Submitting,
    /// The registry accepted the service; the page owns the redirect.
    Submitted,
}

/// User or network event driving the form.
#[derive(Clone, Debug, PartialEq)]
pub enum FormEvent {
    Edit { field: Field, value: String },
    Next,
    Previous,
}

/// Registration form session: draft, cursor, lifecycle, last error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistrationState {
    pub draft: DraftService,
    pub step: Step,
    pub phase: Phase,
    pub error: Option<SubmitError>,
}

impl RegistrationState {
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.phase == Phase::Submitted
    }

    /// Apply a navigation or edit event. Moving the cursor never touches the
    /// draft; `Next` is not gated on field validity.
    #[must_use]
    pub fn apply(&self, event: FormEvent) -> Self {
        let mut next = self.clone();
        match event {
            FormEvent::Edit { field, value } => next.draft = self.draft.with_field(field, &value),
            FormEvent::Next => next.step = self.step.next().unwrap_or(self.step),
            FormEvent::Previous => next.step = self.step.previous().unwrap_or(self.step),
        }
        next
    }

    /// Guard and transform for a submit click.
    ///
    /// On success returns the in-flight state plus the payload to dispatch.
    ///
    /// # Errors
    ///
    /// Returns the reason no request may be sent; pass it to
    /// [`RegistrationState::reject_submit`] to obtain the resulting state.
    pub fn begin_submit(&self) -> Result<(Self, SubmissionPayload), SubmitError> {
        match self.phase {
            Phase::Submitting => return Err(SubmitError::AlreadySubmitting),
            Phase::Submitted => return Err(SubmitError::AlreadySubmitted),
            Phase::Editing => {}
        }
        if !self.step.is_final() {
            return Err(SubmitError::NotOnFinalStep);
        }
        let invalid = self.draft.invalid_fields();
        if !invalid.is_empty() {
            return Err(SubmitError::Invalid(invalid));
        }
        let payload = self.draft.to_payload()?;
        let mut pending = self.clone();
        pending.phase = Phase::Submitting;
        pending.error = None;
        Ok((pending, payload))
    }

    /// State after a submit click was refused by [`RegistrationState::begin_submit`].
    ///
    /// An in-flight or finished submission leaves the state untouched; any
    /// other refusal is recorded so the page can show it.
    #[must_use]
    pub fn reject_submit(&self, err: SubmitError) -> Self {
        if matches!(err, SubmitError::AlreadySubmitting | SubmitError::AlreadySubmitted) {
            return self.clone();
        }
        let mut next = self.clone();
        next.phase = Phase::Editing;
        next.error = Some(err);
        next
    }

    /// Record the registry outcome. The in-flight phase always ends here.
    #[must_use]
    pub fn finish_submit(&self, outcome: Result<(), SubmitError>) -> Self {
        let mut next = self.clone();
        match outcome {
            Ok(()) => {
                next.phase = Phase::Submitted;
                next.error = None;
            }
            Err(err) => {
                next.phase = Phase::Editing;
                next.error = Some(err);
            }
        }
        next
    }
}

/// Holder of the live form state that [`submit`] reads and publishes through.
///
/// The page uses its `RwSignal`; tests use a `RefCell`.
pub trait FormCell {
    fn current(&self) -> RegistrationState;
    fn publish(&self, state: RegistrationState);
}

/// A disposed signal (page already left) reads as a fresh form and drops writes.
impl FormCell for RwSignal<RegistrationState> {
    fn current(&self) -> RegistrationState {
        self.try_get_untracked().unwrap_or_default()
    }

    fn publish(&self, state: RegistrationState) {
        let _ = self.try_set(state);
    }
}

/// Run one submit click to completion against `registry`.
///
/// Publishes the in-flight state before the request is awaited, so a second
/// click arriving meanwhile is refused without dispatching. The outcome is
/// applied to whatever state is current when the response lands; edits made
/// while the request was pending are kept.
///
/// # Errors
///
/// Returns the refusal or registry failure. The form already carries it in
/// `error` (except for the in-flight refusals, which leave it untouched).
pub async fn submit<R, C>(registry: &R, cell: &C) -> Result<(), SubmitError>
where
    R: ServiceRegistry + ?Sized,
    C: FormCell + ?Sized,
{
    let current = cell.current();
    let (pending, payload) = match current.begin_submit() {
        Ok(ready) => ready,
        Err(err) => {
            cell.publish(current.reject_submit(err.clone()));
            return Err(err);
        }
    };
    cell.publish(pending);
    let outcome = registry.create_service(&payload).await.map_err(SubmitError::from);
    cell.publish(cell.current().finish_submit(outcome.clone()));
    outcome
}
