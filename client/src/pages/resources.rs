//! Service catalogue page with category filter and proxy link.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted at both `/` and `/resources`. Fetches the list once on mount and
//! again whenever the category filter changes.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use std::time::Duration;

use leptos::prelude::*;

use crate::components::error_panel::ErrorPanel;
use crate::components::service_card::ServiceCard;
use crate::net::types::Category;
use crate::state::services::ServicesState;

/// Public proxy endpoint consumers call instead of the provider directly.
pub const PROXY_LINK: &str = "https://proxy.tokenlab.metis/api/v1";

/// How long the "Copied!" indicator stays up after copying the proxy link.
pub const COPIED_INDICATOR: Duration = Duration::from_secs(2);

/// Fetch the catalogue for the current filter into `services`.
///
/// The result is dropped if the owning page has already been torn down.
/// A response for a filter that has since changed is discarded.
pub(crate) fn load_services(services: RwSignal<ServicesState>) {
    #[cfg(feature = "hydrate")]
    {
        let Some(generation) = services.try_update(ServicesState::start_load) else {
            return;
        };
        let query = services.get_untracked().query();
        leptos::task::spawn_local(async move {
            let result = crate::net::api::list_services(&query).await;
            if let Err(e) = &result {
                log::warn!("fetch services failed: {e}");
            }
            let _ = services.try_update(|s| s.finish_load(generation, result));
        });
    }
    #[cfg(not(feature = "hydrate"))]
    services.update(|s| {
        s.start_load();
    });
}

/// Catalogue page listing registered services as cards.
#[component]
pub fn ResourcesPage() -> impl IntoView {
    let services = RwSignal::new(ServicesState::default());

    Effect::new(move || load_services(services));

    let on_category = move |ev: leptos::ev::Event| {
        let raw = event_target_value(&ev);
        services.update(|s| s.category = Category::from_wire(&raw));
        load_services(services);
    };

    let on_copy = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let copied = crate::util::browser::copy_to_clipboard(PROXY_LINK).await;
            if let Err(e) = &copied {
                log::warn!("copy proxy link failed: {e}");
            }
            let Some(token) = services.try_update(|s| s.finish_copy(copied.is_ok())) else {
                return;
            };
            gloo_timers::future::sleep(COPIED_INDICATOR).await;
            let _ = services.try_update(|s| s.reset_copy(token));
        });
    };

    let category_options = Category::ALL
        .into_iter()
        .map(|c| view! { <option value=c.as_str()>{c.as_str()}</option> })
        .collect::<Vec<_>>();

    view! {
        <div class="resources-page">
            <header class="resources-page__header">
                <h1>"API Services"</h1>
                <p>"Browse and manage available API services"</p>
            </header>

            <section class="proxy-link">
                <div class="proxy-link__body">
                    <h2 class="proxy-link__title">"Proxy Endpoint"</h2>
                    <code class="proxy-link__url">{PROXY_LINK}</code>
                </div>
                <button class="btn proxy-link__copy" on:click=on_copy>
                    {move || services.get().copy_status.label()}
                </button>
            </section>

            <div class="resources-page__filters">
                <select class="resources-page__category" on:change=on_category>
                    <option value="">"All categories"</option>
                    {category_options}
                </select>
                <a class="btn btn--primary" href="/add-new-service">
                    "Add Service"
                </a>
            </div>

            <ErrorPanel message=Signal::derive(move || services.get().error.map(|e| e.to_string()))/>

            <Show
                when=move || !services.get().loading
                fallback=move || view! { <div class="spinner" aria-label="Loading services"></div> }
            >
                <Show
                    when=move || !services.get().items.is_empty()
                    fallback=move || view! { <p class="resources-page__empty">"No services found."</p> }
                >
                    <div class="resources-page__grid">
                        {move || {
                            services
                                .get()
                                .items
                                .into_iter()
                                .map(|service| view! { <ServiceCard service=service/> })
                                .collect::<Vec<_>>()
                        }}
                    </div>
                </Show>
            </Show>
        </div>
    }
}
