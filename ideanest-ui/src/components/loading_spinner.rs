use leptos::prelude::*;

#[component]
pub fn LoadingSpinner(#[prop(into, optional)] label: Option<String>) -> impl IntoView {
    let label = label.unwrap_or_else(|| "Loading...".to_string());

    view! {
        <div class="loading">
            <div class="loading__spinner"></div>
            <p class="loading__text">{label}</p>
        </div>
    }
}
