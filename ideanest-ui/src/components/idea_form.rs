use leptos::prelude::*;

/// Plain HTML form posting to `/evaluate`, so it works before hydration.
#[component]
pub fn IdeaForm(min_description_chars: usize) -> impl IntoView {
    let description_hint = format!("At least {} characters", min_description_chars);

    view! {
        <form action="/evaluate" method="post" class="idea-form">
            <label class="idea-form__label" for="idea-title">"Idea title"</label>
            <input
                id="idea-title"
                type="text"
                name="idea_title"
                class="idea-form__input"
                placeholder="e.g. Shared solar cold rooms for small farms"
                maxlength="200"
                required
            />

            <label class="idea-form__label" for="idea-description">"Describe the idea"</label>
            <textarea
                id="idea-description"
                name="idea_description"
                class="idea-form__textarea"
                rows="8"
                minlength=min_description_chars.to_string()
                maxlength="5000"
                placeholder=description_hint
                required
            ></textarea>

            <label class="idea-form__label" for="user-id">"Save to history as (optional)"</label>
            <input
                id="user-id"
                type="text"
                name="user_id"
                class="idea-form__input"
                placeholder="your user id"
                maxlength="128"
            />

            <button type="submit" class="idea-form__button">"Evaluate my idea"</button>
        </form>
    }
}
