//! Top navigation bar with the wallet control.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered once by `App` above the routed pages. Wallet state lives in a
//! context signal so the registration form can prefill the provider address
//! from the connected account.

use leptos::prelude::*;

use crate::state::wallet::WalletState;

/// Brand link, primary navigation, and wallet connect/disconnect.
#[component]
pub fn Navbar() -> impl IntoView {
    let wallet = expect_context::<RwSignal<WalletState>>();

    // Pick up an account the user already authorized on a previous visit.
    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        leptos::task::spawn_local(async move {
            match crate::util::wallet::current().await {
                Ok(Some(connection)) => wallet.update(|w| w.finish_connect(Ok(connection))),
                Ok(None) => {}
                Err(e) => log::debug!("wallet probe failed: {e}"),
            }
        });
    });

    let on_connect = move |_| {
        if wallet.get_untracked().connecting {
            return;
        }
        wallet.update(|w| {
            w.connecting = true;
            w.error = None;
        });
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::util::wallet::connect().await;
            if let Err(e) = &result {
                log::warn!("wallet connect failed: {e}");
            }
            wallet.update(|w| w.finish_connect(result));
        });
    };

    let on_switch = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::util::wallet::switch_to_metis().await {
                Ok(chain_id) => wallet.update(|w| {
                    w.chain_id = chain_id;
                    w.error = None;
                }),
                Err(e) => {
                    log::warn!("network switch failed: {e}");
                    wallet.update(|w| w.error = Some(e));
                }
            }
        });
    };

    let on_disconnect = move |_| wallet.update(WalletState::disconnect);

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href="/">
                "TokenLab"
            </a>
            <div class="navbar__links">
                <a class="navbar__link" href="/resources">
                    "Services"
                </a>
                <a class="navbar__link" href="/playground">
                    "Playground"
                </a>
            </div>
            <span class="navbar__spacer"></span>
            <a class="btn btn--primary navbar__create" href="/add-new-service">
                "Create Service"
            </a>
            <Show when=move || wallet.get().wrong_network()>
                <button class="btn navbar__switch" on:click=on_switch title="Wrong network">
                    "Switch to Metis"
                </button>
            </Show>
            <Show
                when=move || wallet.get().is_connected()
                fallback=move || {
                    view! {
                        <button
                            class="btn navbar__connect"
                            on:click=on_connect
                            disabled=move || wallet.get().connecting
                        >
                            {move || if wallet.get().connecting { "Connecting..." } else { "Connect Wallet" }}
                        </button>
                    }
                }
            >
                <span class="navbar__account">{move || wallet.get().account.unwrap_or_default()}</span>
                <button class="btn navbar__disconnect" on:click=on_disconnect>
                    "Disconnect"
                </button>
            </Show>
            <Show when=move || wallet.get().error.is_some()>
                <span class="navbar__error" role="alert">
                    {move || wallet.get().error.unwrap_or_default()}
                </span>
            </Show>
        </nav>
    }
}
