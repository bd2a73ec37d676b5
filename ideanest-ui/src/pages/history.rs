use super::evaluation::server_error_text;
use crate::components::{ErrorDisplay, LoadingSpinner};
use ideanest_app::domain::HistoryEntry;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use server_fn::ServerFnError;

#[server(GetHistoryFn, "/api", endpoint = "get_history")]
pub async fn get_history(user_id: String) -> Result<Vec<HistoryEntry>, ServerFnError> {
    use ideanest_app::AppContext;

    let ctx = expect_context::<AppContext>();
    ctx.history_for(&user_id)
        .await
        .map_err(|e| ServerFnError::new(e.user_message()))
}

#[component]
pub fn HistoryPage() -> impl IntoView {
    let params = use_params_map();
    let user_id = move || params.read().get("user_id").unwrap_or_default();

    let history = Resource::new(user_id, get_history);

    view! {
        <h1 class="page-title">"Your evaluations"</h1>
        <Suspense fallback=move || view! { <LoadingSpinner label="Loading history..."/> }>
            {move || {
                history.get().map(|result| match result {
                    Ok(entries) if entries.is_empty() => view! {
                        <p class="history__empty">"No saved evaluations yet. " <a href="/">"Evaluate an idea"</a></p>
                    }.into_any(),
                    Ok(entries) => view! {
                        <ul class="history">
                            {entries.into_iter().map(|entry| view! { <HistoryItem entry=entry/> }).collect::<Vec<_>>()}
                        </ul>
                    }.into_any(),
                    Err(e) => view! { <ErrorDisplay message=server_error_text(&e)/> }.into_any(),
                })
            }}
        </Suspense>
    }
}

#[component]
fn HistoryItem(entry: HistoryEntry) -> impl IntoView {
    let scores = entry.evaluation.scores();
    let created = entry
        .created_at
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();

    view! {
        <li class="history__item">
            <a href=format!("/evaluation/{}", entry.id) class="history__title">{entry.idea_title}</a>
            <span class="history__score">{format!("{:.1} / 10", scores.overall())}</span>
            <span class="history__date">{created}</span>
        </li>
    }
}
