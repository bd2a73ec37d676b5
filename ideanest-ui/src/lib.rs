pub mod components;
pub mod pages;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use pages::{EvaluationPage, HistoryPage, HomePage};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="IdeaNest | Startup idea evaluator"/>
        <Meta name="description" content="Investor-style evaluations of startup ideas"/>

        <Router>
            <header class="nav">
                <a href="/" class="nav__brand">"IdeaNest"</a>
            </header>
            <main class="container">
                <Routes fallback=|| "Page not found">
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/evaluation/:id") view=EvaluationPage/>
                    <Route path=path!("/history/:user_id") view=HistoryPage/>
                </Routes>
            </main>
        </Router>
    }
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
