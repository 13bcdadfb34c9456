//! Card component for a service in the catalogue grid.
//!
//! DESIGN
//! ======
//! The whole card is a link to the detail route. Rows the backend returned
//! without an id render as plain, non-navigable cards.

use leptos::prelude::*;

use crate::net::types::Service;
use crate::state::services::price_label;

/// A clickable card summarizing one registered service.
#[component]
pub fn ServiceCard(service: Service) -> impl IntoView {
    let price = price_label(&service);
    let href = service.id.as_ref().map(|id| format!("/resources/{id}"));
    let Service { name, description, category, tags, is_active, .. } = service;

    let tags = tags
        .into_iter()
        .map(|tag| view! { <li class="service-card__tag">{tag}</li> })
        .collect::<Vec<_>>();

    view! {
        <a class="service-card" class:service-card--inactive=!is_active href=href>
            <div class="service-card__header">
                <span class="service-card__name">{name}</span>
                {category.map(|c| view! { <span class="service-card__category">{c}</span> })}
            </div>
            <p class="service-card__description">{description.unwrap_or_default()}</p>
            <div class="service-card__price">{price}</div>
            <ul class="service-card__tags">{tags}</ul>
            <Show when=move || !is_active>
                <span class="service-card__status">"Inactive"</span>
            </Show>
        </a>
    }
}
