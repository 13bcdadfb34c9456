//! Inline error panel shared by every page that talks to the backend.

use leptos::prelude::*;

/// Renders nothing while `message` is `None`.
#[component]
pub fn ErrorPanel(#[prop(into)] message: Signal<Option<String>>, #[prop(optional)] title: Option<&'static str>) -> impl IntoView {
    let title = title.unwrap_or("Error");
    view! {
        <Show when=move || message.get().is_some()>
            <div class="error-panel" role="alert">
                <h2 class="error-panel__title">{title}</h2>
                <p class="error-panel__message">{move || message.get().unwrap_or_default()}</p>
            </div>
        </Show>
    }
}
