//! Service detail page with inline edit and delete.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route `/resources/:id`. Loads the service on mount (and on id change),
//! sends a partial `PUT` with only the changed fields, and returns to the
//! catalogue after a confirmed delete.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::error_panel::ErrorPanel;
use crate::net::types::Service;
use crate::state::services::{ServiceDetailState, ServiceEdits, delete_confirmation, price_label};

fn pretty_spec(service: &Service) -> Option<String> {
    service.api_spec.as_ref().and_then(|spec| serde_json::to_string_pretty(spec).ok())
}

fn edit_input(
    detail: RwSignal<ServiceDetailState>,
    label: &'static str,
    input_type: &'static str,
    get: fn(&ServiceEdits) -> String,
    set: fn(&mut ServiceEdits, String),
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-field__label">{label}</span>
            <input
                class="form-field__input"
                type=input_type
                prop:value=move || detail.with(|d| get(&d.edits))
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    detail.update(|d| set(&mut d.edits, value));
                }
            />
        </label>
    }
}

fn detail_row(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="detail__row">
            <dt class="detail__label">{label}</dt>
            <dd class="detail__value">{value}</dd>
        </div>
    }
}

fn read_only(service: Service) -> impl IntoView {
    let price = price_label(&service);
    let spec = pretty_spec(&service);
    let tags = if service.tags.is_empty() { "None".to_owned() } else { service.tags.join(", ") };
    view! {
        <p class="detail__description">{service.description.clone().unwrap_or_default()}</p>
        <dl class="detail__grid">
            {detail_row("Category", service.category.clone().unwrap_or_else(|| "Uncategorized".to_owned()))}
            {detail_row("Pricing", price)}
            {detail_row("Endpoint URL", service.endpoint_url.clone())}
            {service.proxy_url.clone().map(|url| detail_row("Proxy URL", url))}
            {detail_row("Rate Limit", format!("{} requests/min", service.rate_limit))}
            {detail_row("Timeout", format!("{} s", service.timeout))}
            {detail_row("Provider", service.provider_address.clone())}
            {detail_row("Tags", tags)}
            {detail_row("Status", if service.is_active { "Active" } else { "Inactive" }.to_owned())}
            {service.created_at.clone().map(|ts| detail_row("Created", ts))}
        </dl>
        {spec.map(|spec| {
            view! {
                <section class="detail__spec">
                    <h2>"API Specification"</h2>
                    <pre class="detail__spec-body">{spec}</pre>
                </section>
            }
        })}
    }
}

/// Detail view for one service.
#[component]
pub fn ResourceDetailPage() -> impl IntoView {
    let params = use_params_map();
    let detail = RwSignal::new(ServiceDetailState::default());
    let navigate = use_navigate();

    let deleted = RwSignal::new(false);
    Effect::new(move || {
        if deleted.get() {
            navigate("/resources", NavigateOptions::default());
        }
    });

    let service_id = move || params.with_untracked(|p| p.get("id")).unwrap_or_default();

    Effect::new(move || {
        let Some(id) = params.with(|p| p.get("id")) else {
            return;
        };
        detail.set(ServiceDetailState::default());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::fetch_service(&id).await;
            if let Err(e) = &result {
                log::warn!("fetch service {id} failed: {e}");
            }
            let _ = detail.try_update(|d| d.finish_load(result));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    });

    let on_toggle_edit = move |_| {
        detail.update(|d| {
            d.editing = !d.editing;
            d.notice = None;
            if let Some(service) = &d.service {
                d.edits = ServiceEdits::from_service(service);
            }
        });
    };

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let state = detail.get_untracked();
        let Some(service) = state.service.as_ref().filter(|_| !state.busy()) else {
            return;
        };
        let update = match state.edits.to_update(service) {
            Ok(update) => update,
            Err(message) => {
                detail.update(|d| d.notice = Some(message));
                return;
            }
        };
        if update.is_empty() {
            detail.update(|d| {
                d.editing = false;
                d.notice = Some("No changes to save.".to_owned());
            });
            return;
        }
        detail.update(|d| {
            d.updating = true;
            d.notice = None;
        });
        let id = service_id();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::update_service(&id, &update).await;
            if let Err(e) = &result {
                log::warn!("update service {id} failed: {e}");
            }
            let _ = detail.try_update(|d| d.finish_update(result));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, update);
    };

    let on_delete = move |_| {
        let state = detail.get_untracked();
        let Some(service) = state.service.as_ref().filter(|_| !state.busy()) else {
            return;
        };
        if !crate::util::browser::confirm(&delete_confirmation(&service.name)) {
            return;
        }
        detail.update(|d| {
            d.deleting = true;
            d.notice = None;
        });
        let id = service_id();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_service(&id).await {
                Ok(()) => {
                    let _ = deleted.try_set(true);
                }
                Err(e) => {
                    log::warn!("delete service {id} failed: {e}");
                    let _ = detail.try_update(|d| d.fail_delete(&e));
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    };

    let edit_form = move || {
        view! {
            <form class="detail__edit" on:submit=on_save>
                {edit_input(detail, "Service Name", "text", |e| e.name.clone(), |e, v| e.name = v)}
                <label class="form-field">
                    <span class="form-field__label">"Description"</span>
                    <textarea
                        class="form-field__input form-field__input--area"
                        rows="4"
                        prop:value=move || detail.with(|d| d.edits.description.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            detail.update(|d| d.edits.description = value);
                        }
                    ></textarea>
                </label>
                {edit_input(detail, "Base Price", "number", |e| e.base_price.clone(), |e, v| e.base_price = v)}
                {edit_input(detail, "Rate Limit", "number", |e| e.rate_limit.clone(), |e, v| e.rate_limit = v)}
                {edit_input(detail, "Timeout", "number", |e| e.timeout.clone(), |e, v| e.timeout = v)}
                <div class="detail__actions">
                    <button type="submit" class="btn btn--primary" disabled=move || detail.get().updating>
                        {move || if detail.get().updating { "Saving..." } else { "Save Changes" }}
                    </button>
                    <button type="button" class="btn" on:click=on_toggle_edit>
                        "Cancel"
                    </button>
                </div>
            </form>
        }
    };

    view! {
        <div class="detail-page">
            <a class="detail-page__back" href="/resources">
                "← Back to Services"
            </a>
            <Show
                when=move || !detail.get().loading
                fallback=move || view! { <div class="spinner" aria-label="Loading service"></div> }
            >
                <ErrorPanel
                    title="Service unavailable"
                    message=Signal::derive(move || detail.get().error.map(|e| e.to_string()))
                />
                <Show when=move || detail.get().service.is_some()>
                    <article class="detail">
                        <header class="detail__header">
                            <h1 class="detail__name">
                                {move || detail.get().service.map(|s| s.name).unwrap_or_default()}
                            </h1>
                            <div class="detail__header-actions">
                                <button
                                    class="btn"
                                    on:click=on_toggle_edit
                                    disabled=move || detail.get().busy()
                                >
                                    {move || if detail.get().editing { "Close Editor" } else { "Edit" }}
                                </button>
                                <button
                                    class="btn btn--danger"
                                    on:click=on_delete
                                    disabled=move || detail.get().busy()
                                >
                                    {move || if detail.get().deleting { "Deleting..." } else { "Delete" }}
                                </button>
                            </div>
                        </header>
                        <Show when=move || detail.get().notice.is_some()>
                            <p class="detail__notice" role="status">
                                {move || detail.get().notice.unwrap_or_default()}
                            </p>
                        </Show>
                        <Show
                            when=move || detail.get().editing
                            fallback=move || detail.get().service.map(read_only)
                        >
                            {edit_form}
                        </Show>
                    </article>
                </Show>
            </Show>
        </div>
    }
}
