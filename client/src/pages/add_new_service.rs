//! Three-step service registration page.
//!
//! SYSTEM CONTEXT
//! ==============
//! All transitions go through `RegistrationState::apply` and the submit
//! runner in `state::registration`; this page only wires inputs to events
//! and owns the post-success redirect timer.

#[cfg(test)]
#[path = "add_new_service_test.rs"]
mod add_new_service_test;

use std::time::Duration;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::error_panel::ErrorPanel;
use crate::components::step_indicator::StepIndicator;
use crate::net::types::{Category, Currency, PricingModel};
use crate::state::registration::{Field, FormEvent, RegistrationState, Step};
use crate::state::wallet::WalletState;

/// Pause between a successful submit and the redirect to the catalogue.
pub const SUBMITTED_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Route the form lands on after a successful submit.
pub const SUBMITTED_REDIRECT_PATH: &str = "/resources";

/// Post-success redirect: wait for `pause`, then navigate to
/// [`SUBMITTED_REDIRECT_PATH`] through `go` unless `mounted` reports that the
/// page was left in the meantime.
pub async fn redirect_after<P, M, G>(pause: P, mounted: M, go: G)
where
    P: Future<Output = ()>,
    M: FnOnce() -> bool,
    G: FnOnce(&str),
{
    pause.await;
    if mounted() {
        go(SUBMITTED_REDIRECT_PATH);
    }
}

fn dispatch(form: RwSignal<RegistrationState>, event: FormEvent) {
    form.update(|s| *s = s.apply(event));
}

fn edit_handler(form: RwSignal<RegistrationState>, field: Field) -> impl Fn(leptos::ev::Event) + Copy + 'static {
    move |ev| dispatch(form, FormEvent::Edit { field, value: event_target_value(&ev) })
}

fn field_text(form: RwSignal<RegistrationState>, field: Field) -> impl Fn() -> String + Copy + 'static {
    move || form.with(|s| s.draft.field_text(field))
}

fn field_label(field: Field, required: bool) -> impl IntoView {
    view! {
        <label class="form-field__label" for=field.name()>
            {field.label()}
            {required.then_some(" *")}
        </label>
    }
}

fn text_field(
    form: RwSignal<RegistrationState>,
    field: Field,
    input_type: &'static str,
    placeholder: &'static str,
    required: bool,
) -> impl IntoView {
    view! {
        <div class="form-field">
            {field_label(field, required)}
            <input
                class="form-field__input"
                id=field.name()
                name=field.name()
                type=input_type
                placeholder=placeholder
                required=required
                prop:value=field_text(form, field)
                on:input=edit_handler(form, field)
            />
        </div>
    }
}

/// Seeded once per mount; re-binding would rewrite partial input like `0.`.
fn number_field(
    form: RwSignal<RegistrationState>,
    field: Field,
    min: &'static str,
    step: &'static str,
    hint: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-field">
            {field_label(field, true)}
            <input
                class="form-field__input"
                id=field.name()
                name=field.name()
                type="number"
                min=min
                step=step
                required=true
                prop:value=form.with_untracked(|s| s.draft.field_text(field))
                on:input=edit_handler(form, field)
            />
            <span class="form-field__hint">{hint}</span>
        </div>
    }
}

fn text_area(
    form: RwSignal<RegistrationState>,
    field: Field,
    rows: &'static str,
    placeholder: &'static str,
    required: bool,
) -> impl IntoView {
    view! {
        <div class="form-field">
            {field_label(field, required)}
            <textarea
                class="form-field__input form-field__input--area"
                id=field.name()
                name=field.name()
                rows=rows
                placeholder=placeholder
                required=required
                prop:value=field_text(form, field)
                on:input=edit_handler(form, field)
            ></textarea>
        </div>
    }
}

fn select_field(
    form: RwSignal<RegistrationState>,
    field: Field,
    options: Vec<(&'static str, &'static str)>,
    placeholder: Option<&'static str>,
) -> impl IntoView {
    let options = options
        .into_iter()
        .map(|(value, label)| {
            let current = field_text(form, field);
            view! {
                <option value=value selected=move || current() == value>
                    {label}
                </option>
            }
        })
        .collect::<Vec<_>>();
    view! {
        <div class="form-field">
            {field_label(field, true)}
            <select
                class="form-field__input"
                id=field.name()
                name=field.name()
                required=true
                prop:value=field_text(form, field)
                on:change=edit_handler(form, field)
            >
                {placeholder.map(|p| view! { <option value="">{p}</option> })}
                {options}
            </select>
        </div>
    }
}

fn identity_step(form: RwSignal<RegistrationState>) -> impl IntoView {
    let categories = Category::ALL.into_iter().map(|c| (c.as_str(), c.as_str())).collect();
    view! {
        {text_field(form, Field::Name, "text", "e.g. Weather Forecast API", true)}
        {text_area(form, Field::Description, "4", "What does this service do?", true)}
        {select_field(form, Field::Category, categories, Some("Select a category"))}
        {text_field(form, Field::Tags, "text", "weather, forecast, climate", false)}
        <span class="form-field__hint">"Separate tags with commas"</span>
    }
}

fn technical_step(form: RwSignal<RegistrationState>) -> impl IntoView {
    let wallet = expect_context::<RwSignal<WalletState>>();
    let use_wallet = move |_| {
        if let Some(account) = wallet.get_untracked().account {
            dispatch(form, FormEvent::Edit { field: Field::ProviderAddress, value: account });
        }
    };
    view! {
        {text_field(form, Field::EndpointUrl, "url", "https://api.example.com/v1", true)}
        {number_field(form, Field::RateLimit, "1", "1", "Requests per minute")}
        {number_field(form, Field::Timeout, "1", "1", "Seconds")}
        {text_field(form, Field::ProviderAddress, "text", "0x...", true)}
        <Show when=move || wallet.get().is_connected()>
            <button type="button" class="btn btn--link" on:click=use_wallet>
                "Use connected wallet"
            </button>
        </Show>
        {text_area(form, Field::ApiSpec, "8", "{\"openapi\": \"3.0.0\"}", false)}
        <span class="form-field__hint">"JSON document describing the API"</span>
    }
}

fn commercial_step(form: RwSignal<RegistrationState>) -> impl IntoView {
    let models = PricingModel::ALL.into_iter().map(|m| (m.as_str(), m.label())).collect();
    let currencies = Currency::ALL.into_iter().map(|c| (c.as_str(), c.as_str())).collect();
    view! {
        {select_field(form, Field::PricingModel, models, None)}
        {number_field(form, Field::BasePrice, "0", "any", "Price per unit of the selected model")}
        {select_field(form, Field::Currency, currencies, None)}
    }
}

/// Registration form: one panel per step, submit on the last.
#[component]
pub fn AddNewServicePage() -> impl IntoView {
    let form = RwSignal::new(RegistrationState::default());
    let navigate = use_navigate();

    // Only re-render the panel when the step changes, not on every keystroke.
    let step = Memo::new(move |_| form.with(|s| s.step));
    let submitting = Memo::new(move |_| form.with(RegistrationState::is_submitting));
    let submitted = Memo::new(move |_| form.with(RegistrationState::is_submitted));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::state::registration::submit(&crate::net::api::HttpRegistry, &form).await {
                    Ok(()) => {
                        redirect_after(
                            gloo_timers::future::sleep(SUBMITTED_REDIRECT_DELAY),
                            || form.try_get_untracked().is_some(),
                            |path| navigate(path, NavigateOptions::default()),
                        )
                        .await;
                    }
                    Err(
                        crate::state::registration::SubmitError::AlreadySubmitting
                        | crate::state::registration::SubmitError::AlreadySubmitted,
                    ) => {}
                    Err(e) => log::error!("Error creating service: {e}"),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = &navigate;
    };

    let panel = move || match step.get() {
        Step::Identity => identity_step(form).into_any(),
        Step::Technical => technical_step(form).into_any(),
        Step::Commercial => commercial_step(form).into_any(),
    };

    view! {
        <div class="register-page">
            <header class="register-page__header">
                <h1>"Register a New Service"</h1>
                <p>"List your API on the TokenLab marketplace"</p>
            </header>

            <StepIndicator current=step/>

            <form class="register-form" on:submit=on_submit>
                <h2 class="register-form__title">{move || step.get().title()}</h2>
                <p class="register-form__subtitle">{move || step.get().subtitle()}</p>

                <fieldset class="register-form__fields" disabled=move || submitting.get() || submitted.get()>
                    {panel}
                </fieldset>

                <ErrorPanel
                    title="Could not create service"
                    message=Signal::derive(move || form.with(|s| s.error.as_ref().map(ToString::to_string)))
                />

                <Show when=move || submitted.get()>
                    <div class="register-form__success" role="status">
                        "Service created! Redirecting to services..."
                    </div>
                </Show>

                <div class="register-form__actions">
                    <button
                        type="button"
                        class="btn"
                        disabled=move || step.get() == Step::Identity || submitting.get()
                        on:click=move |_| dispatch(form, FormEvent::Previous)
                    >
                        "Previous"
                    </button>
                    <Show
                        when=move || step.get().is_final()
                        fallback=move || {
                            view! {
                                <button
                                    type="button"
                                    class="btn btn--primary"
                                    on:click=move |_| dispatch(form, FormEvent::Next)
                                >
                                    "Next"
                                </button>
                            }
                        }
                    >
                        <button
                            type="submit"
                            class="btn btn--primary"
                            disabled=move || submitting.get() || submitted.get()
                        >
                            {move || if submitting.get() { "Creating Service..." } else { "Create Service" }}
                        </button>
                    </Show>
                </div>
            </form>
        </div>
    }
}
