use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::executor::block_on;
use serde_json::json;

use super::*;

/// Yields to the executor exactly once, so a join can interleave two clicks.
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            return Poll::Ready(());
        }
        self.0 = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

impl FormCell for RefCell<RegistrationState> {
    fn current(&self) -> RegistrationState {
        self.borrow().clone()
    }

    fn publish(&self, state: RegistrationState) {
        *self.borrow_mut() = state;
    }
}

/// Registry fake that counts dispatches and answers with a fixed outcome.
struct CountingRegistry {
    calls: Cell<usize>,
    last_body: RefCell<Option<serde_json::Value>>,
    outcome: Result<(), ApiError>,
}

impl CountingRegistry {
    fn ok() -> Self {
        Self { calls: Cell::new(0), last_body: RefCell::new(None), outcome: Ok(()) }
    }

    fn failing(status: u16) -> Self {
        Self {
            calls: Cell::new(0),
            last_body: RefCell::new(None),
            outcome: Err(ApiError::from_status(status, "create service")),
        }
    }
}

#[async_trait(?Send)]
impl ServiceRegistry for CountingRegistry {
    async fn create_service(&self, payload: &SubmissionPayload) -> Result<(), ApiError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_body.borrow_mut() = Some(serde_json::to_value(payload).unwrap());
        YieldOnce(false).await;
        self.outcome.clone()
    }
}

fn edit(state: &RegistrationState, field: Field, value: &str) -> RegistrationState {
    state.apply(FormEvent::Edit { field, value: value.to_owned() })
}

fn ready_to_submit() -> RegistrationState {
    let mut state = RegistrationState::default();
    for (field, value) in [
        (Field::Name, "Weather API"),
        (Field::Description, "Current conditions by city"),
        (Field::Category, "Weather"),
        (Field::Tags, "weather, data"),
        (Field::EndpointUrl, "https://weather.example/v1"),
        (Field::ProviderAddress, "0x1234567890123456789012345678901234567890"),
        (Field::ApiSpec, r#"{"type":"REST"}"#),
        (Field::BasePrice, "0.25"),
    ] {
        state = edit(&state, field, value);
    }
    state.apply(FormEvent::Next).apply(FormEvent::Next)
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn draft_defaults_match_mount_values() {
    let draft = DraftService::default();
    assert_eq!(draft.pricing_model, PricingModel::PerCall);
    assert_eq!(draft.currency, Currency::Eth);
    assert_eq!(draft.category, None);
    assert_eq!(draft.rate_limit, 10);
    assert_eq!(draft.timeout, 30);
    assert_eq!(draft.base_price, 0.0);
    assert_eq!(draft.api_spec, "{}");
}

#[test]
fn state_starts_on_first_step_editing() {
    let state = RegistrationState::default();
    assert_eq!(state.step, Step::Identity);
    assert_eq!(state.phase, Phase::Editing);
    assert!(state.error.is_none());
}

// =============================================================
// Step navigation
// =============================================================

#[test]
fn previous_then_next_returns_to_same_step() {
    for n in 1..=TOTAL_STEPS {
        let mut state = RegistrationState::default();
        state.step = Step::from_number(n).unwrap();
        let there_and_back = state.apply(FormEvent::Previous).apply(FormEvent::Next);
        let back_and_there = state.apply(FormEvent::Next).apply(FormEvent::Previous);
        if n > 1 {
            assert_eq!(there_and_back.step, state.step);
        }
        if n < TOTAL_STEPS {
            assert_eq!(back_and_there.step, state.step);
        }
    }
}

#[test]
fn next_is_noop_on_last_step() {
    let mut state = RegistrationState::default();
    state.step = Step::Commercial;
    assert_eq!(state.apply(FormEvent::Next), state);
}

#[test]
fn previous_is_noop_on_first_step() {
    let state = RegistrationState::default();
    assert_eq!(state.apply(FormEvent::Previous), state);
}

#[test]
fn next_is_not_gated_by_blank_fields() {
    let state = RegistrationState::default().apply(FormEvent::Next);
    assert_eq!(state.step, Step::Technical);
}

#[test]
fn navigation_keeps_draft_intact() {
    let state = edit(&RegistrationState::default(), Field::Name, "Translator");
    let moved = state.apply(FormEvent::Next).apply(FormEvent::Next).apply(FormEvent::Previous);
    assert_eq!(moved.draft, state.draft);
    assert_eq!(moved.step, Step::Technical);
}

#[test]
fn step_numbers_round_trip() {
    for step in Step::ALL {
        assert_eq!(Step::from_number(step.number()), Some(step));
    }
    assert_eq!(Step::from_number(0), None);
    assert_eq!(Step::from_number(4), None);
}

// =============================================================
// Field editing
// =============================================================

#[test]
fn edit_updates_exactly_one_field() {
    let before = RegistrationState::default();
    let after = edit(&before, Field::Description, "hello");
    assert_eq!(after.draft.description, "hello");
    let mut expected = before.draft.clone();
    expected.description = "hello".to_owned();
    assert_eq!(after.draft, expected);
}

#[test]
fn apply_does_not_mutate_input() {
    let before = RegistrationState::default();
    let _ = edit(&before, Field::Name, "x");
    assert_eq!(before, RegistrationState::default());
}

#[test]
fn rate_limit_text_is_coerced_to_number() {
    let state = edit(&RegistrationState::default(), Field::RateLimit, "15");
    assert_eq!(state.draft.rate_limit, 15);
}

#[test]
fn numeric_fields_coerce_blank_to_zero() {
    let state = edit(&RegistrationState::default(), Field::Timeout, "");
    assert_eq!(state.draft.timeout, 0);
}

#[test]
fn numeric_fields_keep_previous_on_garbage_but_mark_it() {
    let state = edit(&RegistrationState::default(), Field::BasePrice, "1.5");
    let state = edit(&state, Field::BasePrice, "abc");
    assert_eq!(state.draft.base_price, 1.5);
    assert_eq!(state.draft.unparsed, vec![Field::BasePrice]);
}

#[test]
fn parseable_edit_clears_unparsed_mark() {
    let state = edit(&RegistrationState::default(), Field::RateLimit, "1.5");
    let state = edit(&state, Field::RateLimit, "20");
    assert_eq!(state.draft.rate_limit, 20);
    assert!(state.draft.unparsed.is_empty());
}

#[test]
fn field_lookup_by_input_name() {
    assert_eq!(Field::from_name("rate_limit"), Some(Field::RateLimit));
    assert_eq!(Field::from_name("api_spec"), Some(Field::ApiSpec));
    assert_eq!(Field::from_name("unknown"), None);
    assert!(Field::ALL.iter().filter(|f| f.is_numeric()).count() == 3);
}

#[test]
fn select_fields_ignore_unknown_options() {
    let state = edit(&RegistrationState::default(), Field::Currency, "DOGE");
    assert_eq!(state.draft.currency, Currency::Eth);
    let state = edit(&state, Field::PricingModel, "subscription");
    assert_eq!(state.draft.pricing_model, PricingModel::Subscription);
    let state = edit(&state, Field::Category, "AI/ML");
    assert_eq!(state.draft.category, Some(Category::AiMl));
    let state = edit(&state, Field::Category, "");
    assert_eq!(state.draft.category, None);
}

#[test]
fn field_text_reflects_draft_values() {
    let state = edit(&RegistrationState::default(), Field::Category, "Finance");
    assert_eq!(state.draft.field_text(Field::Category), "Finance");
    assert_eq!(state.draft.field_text(Field::RateLimit), "10");
    assert_eq!(state.draft.field_text(Field::Currency), "ETH");
}

// =============================================================
// Submission transform
// =============================================================

#[test]
fn split_tags_trims_and_drops_empties() {
    assert_eq!(split_tags("a, b ,,c"), vec!["a", "b", "c"]);
    assert!(split_tags("").is_empty());
}

#[test]
fn split_tags_keeps_order_and_duplicates() {
    assert_eq!(split_tags("z, a, z"), vec!["z", "a", "z"]);
}

#[test]
fn parse_api_spec_yields_object() {
    assert_eq!(parse_api_spec(r#"{"type":"REST"}"#).unwrap(), json!({"type": "REST"}));
}

#[test]
fn parse_api_spec_rejects_non_json() {
    assert!(matches!(parse_api_spec("not json"), Err(SubmitError::MalformedSpec(_))));
}

#[test]
fn to_payload_is_idempotent() {
    let draft = ready_to_submit().draft;
    assert_eq!(draft.to_payload().unwrap(), draft.to_payload().unwrap());
}

#[test]
fn payload_serializes_tags_as_array_and_spec_as_object() {
    let payload = ready_to_submit().draft.to_payload().unwrap();
    let body = serde_json::to_value(&payload).unwrap();
    assert_eq!(body["tags"], json!(["weather", "data"]));
    assert_eq!(body["api_spec"], json!({"type": "REST"}));
    assert_eq!(body["pricing_model"], json!("per_call"));
    assert_eq!(body["currency"], json!("ETH"));
    assert_eq!(body["category"], json!("Weather"));
    assert_eq!(body["rate_limit"], json!(10));
}

#[test]
fn invalid_fields_lists_blank_required_values() {
    let draft = DraftService::default();
    assert_eq!(
        draft.invalid_fields(),
        vec![Field::Name, Field::Description, Field::EndpointUrl, Field::ProviderAddress, Field::Category]
    );
}

#[test]
fn invalid_fields_checks_numeric_ranges() {
    let mut draft = ready_to_submit().draft;
    draft.rate_limit = 0;
    draft.timeout = 0;
    draft.base_price = -1.0;
    assert_eq!(draft.invalid_fields(), vec![Field::BasePrice, Field::RateLimit, Field::Timeout]);
}

#[test]
fn unparseable_numbers_block_submission() {
    let state = edit(&ready_to_submit(), Field::RateLimit, "-3");
    let state = edit(&state, Field::Timeout, "1.5");
    let state = edit(&state, Field::BasePrice, "cheap");
    assert_eq!(state.draft.rate_limit, 10);
    assert_eq!(
        state.begin_submit().unwrap_err(),
        SubmitError::Invalid(vec![Field::BasePrice, Field::RateLimit, Field::Timeout])
    );
}

#[test]
fn overflowing_rate_limit_blocks_submission() {
    let state = edit(&ready_to_submit(), Field::RateLimit, "99999999999");
    assert_eq!(state.begin_submit().unwrap_err(), SubmitError::Invalid(vec![Field::RateLimit]));
}

// =============================================================
// Submit guard
// =============================================================

#[test]
fn begin_submit_requires_final_step() {
    let mut state = ready_to_submit();
    state.step = Step::Technical;
    assert_eq!(state.begin_submit().unwrap_err(), SubmitError::NotOnFinalStep);
}

#[test]
fn begin_submit_sets_submitting_and_clears_error() {
    let mut state = ready_to_submit();
    state.error = Some(SubmitError::NotOnFinalStep);
    let (pending, payload) = state.begin_submit().unwrap();
    assert!(pending.is_submitting());
    assert!(pending.error.is_none());
    assert_eq!(payload.name, "Weather API");
}

#[test]
fn reject_submit_ignores_in_flight_refusal() {
    let (pending, _) = ready_to_submit().begin_submit().unwrap();
    assert_eq!(pending.reject_submit(SubmitError::AlreadySubmitting), pending);
}

#[test]
fn invalid_error_message_names_fields() {
    let err = SubmitError::Invalid(vec![Field::Name, Field::Category]);
    assert_eq!(err.to_string(), "Please complete: Service Name, Category");
}

// =============================================================
// Dispatch
// =============================================================

#[test]
fn submit_success_posts_once_and_marks_submitted() {
    let registry = CountingRegistry::ok();
    let cell = RefCell::new(ready_to_submit());
    assert_eq!(block_on(submit(&registry, &cell)), Ok(()));
    assert_eq!(registry.calls.get(), 1);
    let state = cell.into_inner();
    assert!(state.is_submitted());
    assert!(!state.is_submitting());
    let body = registry.last_body.borrow().clone().unwrap();
    assert!(body["tags"].is_array());
    assert!(body["api_spec"].is_object());
}

#[test]
fn submit_failure_clears_submitting_and_records_error() {
    let registry = CountingRegistry::failing(500);
    let cell = RefCell::new(ready_to_submit());
    let result = block_on(submit(&registry, &cell));
    assert_eq!(registry.calls.get(), 1);
    assert!(matches!(result, Err(SubmitError::Api(ApiError::NetworkFailure { status: Some(500), .. }))));
    let state = cell.into_inner();
    assert!(!state.is_submitting());
    assert!(!state.is_submitted());
    assert_eq!(state.error, result.err());
}

#[test]
fn malformed_spec_aborts_before_network_call() {
    let registry = CountingRegistry::ok();
    let cell = RefCell::new(edit(&ready_to_submit(), Field::ApiSpec, "not json"));
    let result = block_on(submit(&registry, &cell));
    assert_eq!(registry.calls.get(), 0);
    assert!(matches!(result, Err(SubmitError::MalformedSpec(_))));
    let state = cell.into_inner();
    assert!(!state.is_submitting());
    assert!(!state.is_submitted());
    assert!(matches!(state.error, Some(SubmitError::MalformedSpec(_))));
}

#[test]
fn blank_required_field_aborts_before_network_call() {
    let registry = CountingRegistry::ok();
    let cell = RefCell::new(edit(&ready_to_submit(), Field::Name, "   "));
    let result = block_on(submit(&registry, &cell));
    assert_eq!(registry.calls.get(), 0);
    assert_eq!(result, Err(SubmitError::Invalid(vec![Field::Name])));
    assert_eq!(cell.into_inner().error, Some(SubmitError::Invalid(vec![Field::Name])));
}

#[test]
fn second_click_while_submitting_does_not_dispatch() {
    let registry = CountingRegistry::ok();
    let cell = RefCell::new(ready_to_submit());
    let (first, second) = block_on(async { futures::join!(submit(&registry, &cell), submit(&registry, &cell)) });
    assert_eq!(first, Ok(()));
    assert_eq!(second, Err(SubmitError::AlreadySubmitting));
    assert_eq!(registry.calls.get(), 1);
    assert!(cell.into_inner().is_submitted());
}

#[test]
fn in_flight_refusal_leaves_state_untouched() {
    let registry = CountingRegistry::ok();
    let (pending, _payload) = ready_to_submit().begin_submit().unwrap();
    let cell = RefCell::new(pending.clone());
    assert_eq!(block_on(submit(&registry, &cell)), Err(SubmitError::AlreadySubmitting));
    assert_eq!(registry.calls.get(), 0);
    assert_eq!(cell.into_inner(), pending);
}

#[test]
fn submitted_form_does_not_dispatch_again() {
    let registry = CountingRegistry::ok();
    let cell = RefCell::new(ready_to_submit());
    assert_eq!(block_on(submit(&registry, &cell)), Ok(()));
    assert_eq!(block_on(submit(&registry, &cell)), Err(SubmitError::AlreadySubmitted));
    assert_eq!(registry.calls.get(), 1);
}

#[test]
fn failure_keeps_edits_made_while_in_flight() {
    let registry = CountingRegistry::failing(502);
    let cell = RefCell::new(ready_to_submit());
    // Runs while the first poll of `submit` is parked on the registry.
    let edit_during_flight = async {
        let current = cell.current();
        cell.publish(edit(&current, Field::Currency, "USDC"));
    };
    let (result, ()) = block_on(async { futures::join!(submit(&registry, &cell), edit_during_flight) });
    assert!(result.is_err());
    let state = cell.into_inner();
    assert_eq!(state.draft.currency, Currency::Usdc);
    assert!(!state.is_submitting());
}
