use crate::components::IdeaForm;
use ideanest_app::config::DEFAULT_MIN_DESCRIPTION_CHARS;
use leptos::prelude::*;
use server_fn::ServerFnError;

#[server(MinDescriptionCharsFn, "/api", endpoint = "min_description_chars")]
pub async fn min_description_chars() -> Result<usize, ServerFnError> {
    use ideanest_app::AppContext;

    Ok(expect_context::<AppContext>().min_description_chars)
}

#[component]
pub fn HomePage() -> impl IntoView {
    let min_chars = Resource::new(|| (), |_| min_description_chars());

    view! {
        <div class="hero">
            <h1 class="hero__title">"IdeaNest"</h1>
            <p class="hero__subtitle">
                "Describe your startup idea and get a blunt, investor-style evaluation in under a minute."
            </p>
        </div>

        <Suspense fallback=move || view! { <IdeaForm min_description_chars=DEFAULT_MIN_DESCRIPTION_CHARS/> }>
            {move || {
                min_chars.get().map(|result| {
                    let min = result.unwrap_or(DEFAULT_MIN_DESCRIPTION_CHARS);
                    view! { <IdeaForm min_description_chars=min/> }
                })
            }}
        </Suspense>

        <section class="how-it-works">
            <h2>"How it works"</h2>
            <ol>
                <li>"Describe the problem, the solution and who pays for it."</li>
                <li>"An AI analyst scores innovation, feasibility and scalability."</li>
                <li>"Read the SWOT, competitors and a pitch deck outline, then iterate."</li>
            </ol>
        </section>
    }
}
