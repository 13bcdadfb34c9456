//! Alith AI playground: chat transcript plus a sidebar of executable services.
//!
//! SYSTEM CONTEXT
//! ==============
//! Queries go to `POST /api/v1/alith/query` and one-click runs to
//! `POST /api/v1/alith/execute`. The sidebar reuses the catalogue loader so it
//! shows whatever is currently registered.

use leptos::prelude::*;

use crate::components::error_panel::ErrorPanel;
use crate::state::playground::{PlaygroundState, Sender, is_send_key};
use crate::state::services::ServicesState;
use crate::util::browser::now_iso;
use crate::util::markdown::render_markdown_html;

use super::resources::load_services;

/// Chat page for the Alith assistant.
#[component]
pub fn PlaygroundPage() -> impl IntoView {
    let chat = RwSignal::new(PlaygroundState::new(&now_iso()));
    let services = RwSignal::new(ServicesState::default());
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || load_services(services));

    // Keep the newest message in view.
    Effect::new(move || {
        let state = chat.get();
        let _ = state.messages.len();
        let _ = state.loading;

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    let do_send = move || {
        let Some(request) = chat.try_update(|c| c.begin_query(&now_iso())).flatten() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::alith_query(&request).await;
            if let Err(e) = &result {
                log::error!("Error sending message: {e}");
            }
            let _ = chat.try_update(|c| c.finish_query(result, &now_iso()));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    let do_execute = move |service_id: String| {
        let Some(request) = chat.try_update(|c| c.begin_execute(&service_id)).flatten() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::alith_execute(&request).await;
            if let Err(e) = &result {
                log::error!("Error executing service {}: {e}", request.service_id);
            }
            let _ = chat.try_update(|c| c.finish_execute(result, &now_iso()));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if is_send_key(&ev.key(), ev.shift_key()) {
            ev.prevent_default();
            do_send();
        }
    };

    let transcript = move || {
        chat.get()
            .messages
            .into_iter()
            .map(|msg| {
                let from_alith = msg.sender == Sender::Alith;
                view! {
                    <div
                        class="playground__message"
                        class:playground__message--alith=from_alith
                        class:playground__message--user=!from_alith
                    >
                        <span class="playground__sender">{if from_alith { "Alith" } else { "You" }}</span>
                        {if from_alith {
                            let rendered = render_markdown_html(&msg.content);
                            view! { <div class="playground__markdown" inner_html=rendered></div> }.into_any()
                        } else {
                            view! { <p class="playground__text">{msg.content}</p> }.into_any()
                        }}
                    </div>
                }
            })
            .collect::<Vec<_>>()
    };

    let sidebar = move || {
        services
            .get()
            .addressable()
            .filter_map(|service| {
                let id = service.id.clone()?;
                let name = service.name.clone();
                let summary = service.description.clone().unwrap_or_default();
                Some(view! {
                    <li class="playground__service">
                        <span class="playground__service-name">{name}</span>
                        <span class="playground__service-summary">{summary}</span>
                        <button
                            class="btn playground__execute"
                            disabled=move || chat.get().loading
                            on:click=move |_| do_execute(id.clone())
                        >
                            "Execute"
                        </button>
                    </li>
                })
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="playground">
            <aside class="playground__sidebar">
                <h2>"Available Services"</h2>
                <Show
                    when=move || !services.get().loading
                    fallback=move || view! { <p class="playground__hint">"Loading services..."</p> }
                >
                    <ul class="playground__services">{sidebar}</ul>
                </Show>
                <ErrorPanel message=Signal::derive(move || services.get().error.map(|e| e.to_string()))/>
            </aside>

            <section class="playground__chat">
                <header class="playground__header">
                    <h1>"Alith Playground"</h1>
                    <p>"Ask Alith to find, compare, or run marketplace services"</p>
                </header>
                <div class="playground__messages" node_ref=messages_ref>
                    {transcript}
                    {move || {
                        chat.get()
                            .loading
                            .then(|| view! { <div class="playground__loading">"Alith is thinking..."</div> })
                    }}
                </div>
                <ErrorPanel message=Signal::derive(move || chat.get().error)/>
                <div class="playground__input-row">
                    <textarea
                        class="playground__input"
                        rows="2"
                        placeholder="Ask Alith anything..."
                        disabled=move || chat.get().loading
                        prop:value=move || chat.get().input
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            chat.update(|c| c.input = value);
                        }
                        on:keydown=on_keydown
                    ></textarea>
                    <button
                        class="btn btn--primary playground__send"
                        on:click=move |_| do_send()
                        disabled=move || !chat.get().can_send()
                    >
                        "Send"
                    </button>
                </div>
            </section>
        </div>
    }
}
