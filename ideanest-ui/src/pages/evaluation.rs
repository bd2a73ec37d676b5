use crate::components::{ErrorDisplay, EvaluationReport, LoadingSpinner};
use ideanest_app::domain::HistoryEntry;
use leptos::form::ActionForm;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use server_fn::ServerFnError;

#[server(GetEvaluationFn, "/api", endpoint = "get_evaluation")]
pub async fn get_evaluation(id: String) -> Result<HistoryEntry, ServerFnError> {
    use ideanest_app::AppContext;

    let ctx = expect_context::<AppContext>();
    ctx.find_evaluation(&id)
        .await
        .map_err(|e| ServerFnError::new(e.user_message()))
}

#[server(DeleteEvaluationFn, "/api", endpoint = "delete_evaluation")]
pub async fn delete_evaluation(id: String) -> Result<(), ServerFnError> {
    use ideanest_app::AppContext;

    let ctx = expect_context::<AppContext>();
    ctx.delete_evaluation(&id)
        .await
        .map_err(|e| ServerFnError::new(e.user_message()))
}

#[component]
pub fn EvaluationPage() -> impl IntoView {
    let params = use_params_map();
    let id = move || params.read().get("id").unwrap_or_default();

    let evaluation = Resource::new(id, get_evaluation);
    let delete = ServerAction::<DeleteEvaluationFn>::new();

    view! {
        <Suspense fallback=move || view! { <LoadingSpinner label="Loading evaluation..."/> }>
            {move || {
                evaluation.get().map(|result| match result {
                    Ok(entry) => view! { <EntryView entry=entry delete=delete/> }.into_any(),
                    Err(e) => view! { <ErrorDisplay message=server_error_text(&e)/> }.into_any(),
                })
            }}
        </Suspense>
    }
}

#[component]
fn EntryView(entry: HistoryEntry, delete: ServerAction<DeleteEvaluationFn>) -> impl IntoView {
    let id = entry.id.to_string();
    let history_link = format!("/history/{}", entry.user_id);
    let deleted = move || matches!(delete.value().get(), Some(Ok(())));

    view! {
        <Show
            when=move || !deleted()
            fallback=move || view! {
                <p class="notice">"Evaluation deleted. " <a href="/">"Evaluate another idea"</a></p>
            }
        >
            <EvaluationReport title=entry.idea_title.clone() evaluation=entry.evaluation.clone()/>
            <div class="report__actions">
                <a href=history_link.clone() class="report__link">"Back to history"</a>
                {
                    let id = id.clone();
                    view! {
                        <ActionForm action=delete>
                            <input type="hidden" name="id" value=id/>
                            <button type="submit" class="report__delete">"Delete"</button>
                        </ActionForm>
                    }
                }
            </div>
        </Show>
        {move || {
            delete.value().get().and_then(Result::err).map(|e| view! {
                <ErrorDisplay message=server_error_text(&e)/>
            })
        }}
    }
}

/// Server function errors arrive wrapped; only the message is for users.
pub(crate) fn server_error_text(err: &ServerFnError) -> String {
    match err {
        ServerFnError::ServerError(message) => message.clone(),
        other => other.to_string(),
    }
}
