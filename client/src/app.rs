//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::pages::{
    add_new_service::AddNewServicePage, playground::PlaygroundPage, resource_detail::ResourceDetailPage,
    resources::ResourcesPage,
};
use crate::state::wallet::WalletState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the wallet context and sets up client-side routing. `/` and
/// `/resources` both land on the catalogue.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let wallet = RwSignal::new(WalletState::default());
    provide_context(wallet);

    view! {
        <Stylesheet id="leptos" href="/pkg/tokenlab.css"/>
        <Title text="TokenLab"/>

        <Router>
            <Navbar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=ResourcesPage/>
                    <Route path=StaticSegment("resources") view=ResourcesPage/>
                    <Route path=(StaticSegment("resources"), ParamSegment("id")) view=ResourceDetailPage/>
                    <Route path=StaticSegment("add-new-service") view=AddNewServicePage/>
                    <Route path=StaticSegment("playground") view=PlaygroundPage/>
                </Routes>
            </main>
        </Router>
    }
}
