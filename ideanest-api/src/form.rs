//! `/evaluate`: the no-JavaScript form flow. The report is rendered on the
//! server as one HTML page.

use crate::client_addr::ClientAddr;
use crate::styles::CSS;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};
use ideanest_app::domain::EvaluationRecord;
use ideanest_app::AppContext;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct IdeaForm {
    #[serde(default)]
    idea_title: String,
    #[serde(default)]
    idea_description: String,
    #[serde(default)]
    user_id: Option<String>,
}

pub fn router<S>(ctx: AppContext) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/evaluate", get(submit_query).post(submit))
        .with_state(ctx)
}

async fn submit(
    State(ctx): State<AppContext>,
    client: ClientAddr,
    Form(form): Form<IdeaForm>,
) -> (StatusCode, Html<String>) {
    handle_idea_form(ctx, client, form).await
}

async fn submit_query(
    State(ctx): State<AppContext>,
    client: ClientAddr,
    Query(form): Query<IdeaForm>,
) -> (StatusCode, Html<String>) {
    handle_idea_form(ctx, client, form).await
}

async fn handle_idea_form(
    ctx: AppContext,
    ClientAddr(ip): ClientAddr,
    form: IdeaForm,
) -> (StatusCode, Html<String>) {
    let result = ctx
        .evaluate(
            ip,
            &form.idea_title,
            &form.idea_description,
            form.user_id.as_deref(),
        )
        .await;

    match result {
        Ok(outcome) => (
            StatusCode::OK,
            Html(render_report_page(
                form.idea_title.trim(),
                &outcome.evaluation,
                outcome.evaluation_id,
            )),
        ),
        Err(e) => (e.status_code(), Html(render_error_page(e.user_message()))),
    }
}

pub fn render_report_page(
    title: &str,
    evaluation: &EvaluationRecord,
    evaluation_id: Option<Uuid>,
) -> String {
    // A saved report gets its permanent address, so a reload does not re-run it.
    let replace_state = evaluation_id
        .map(|id| format!("<script>history.replaceState(null, '', '/evaluation/{id}');</script>"))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} | IdeaNest</title>
    <style>{CSS}</style>
    {replace_state}
</head>
<body>
    <header class="nav"><a href="/" class="nav__brand">IdeaNest</a></header>
    <main class="container">
        {report}
        <p><a href="/" class="error__retry">Evaluate another idea</a></p>
    </main>
</body>
</html>"#,
        title = escape_html(title),
        CSS = CSS,
        replace_state = replace_state,
        report = render_report(title, evaluation),
    )
}

pub fn render_error_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Error | IdeaNest</title>
    <style>{CSS}</style>
</head>
<body>
    <main class="container">
        <div class="error">
            <p class="error__title">Something went wrong</p>
            <p class="error__message">{message}</p>
            <a href="/" class="error__retry">Try again</a>
        </div>
    </main>
</body>
</html>"#,
        message = escape_html(message),
        CSS = CSS
    )
}

fn render_report(title: &str, evaluation: &EvaluationRecord) -> String {
    let scores = evaluation.scores();
    let swot = evaluation.swot_analysis();
    let pci = evaluation.pros_cons_improvements();

    let mut html = format!(
        r#"<article class="report"><h2 class="report__title">{}</h2><p class="report__pitch">{}</p>"#,
        escape_html(title),
        escape_html(evaluation.pitch_summary())
    );

    html.push_str(&format!(
        r#"<section class="report__section scores"><h3>Scores</h3><p class="scores__overall">{:.1} / 10</p><ul class="scores__list">"#,
        scores.overall()
    ));
    for (name, value) in [
        ("Innovation", scores.innovation),
        ("Feasibility", scores.feasibility),
        ("Scalability", scores.scalability),
    ] {
        html.push_str(&format!(
            r#"<li class="scores__item"><span>{name}</span><meter min="0" max="10" value="{value}"></meter><span>{value:.1}</span></li>"#
        ));
    }
    html.push_str("</ul></section>");

    for (heading, body) in [
        ("Problem", evaluation.problem_statement()),
        ("Existing solutions", evaluation.existing_solutions()),
        ("Proposed solution", evaluation.proposed_solution()),
        ("Market potential", evaluation.market_potential()),
        ("Business model", evaluation.business_model()),
    ] {
        html.push_str(&text_section(heading, body));
    }

    html.push_str(r#"<section class="report__section report__grid"><h3>SWOT analysis</h3>"#);
    html.push_str(&list_block("Strengths", &swot.strengths));
    html.push_str(&list_block("Weaknesses", &swot.weaknesses));
    html.push_str(&list_block("Opportunities", &swot.opportunities));
    html.push_str(&list_block("Threats", &swot.threats));
    html.push_str("</section>");

    html.push_str(r#"<section class="report__section report__grid"><h3>Pros, cons and improvements</h3>"#);
    html.push_str(&list_block("Pros", &pci.pros));
    html.push_str(&list_block("Cons", &pci.cons));
    html.push_str(&list_block("Improvements", &pci.improvements));
    html.push_str("</section>");

    let refined = evaluation.refined_versions();
    if !refined.is_empty() {
        html.push_str(r#"<section class="report__section"><h3>Refined versions</h3>"#);
        for version in refined {
            html.push_str(&format!(
                r#"<div class="report__card"><h4>{}</h4><p>{}</p><p class="report__why">{}</p></div>"#,
                escape_html(&version.title),
                escape_html(&version.description),
                escape_html(&version.why_it_works)
            ));
        }
        html.push_str("</section>");
    }

    let competitors = evaluation.competitors();
    if !competitors.is_empty() {
        html.push_str(r#"<section class="report__section"><h3>Competitors</h3>"#);
        for competitor in competitors {
            html.push_str(&format!(
                r#"<div class="report__card"><h4>{}</h4><p>{}</p>"#,
                escape_html(&competitor.name),
                escape_html(&competitor.description)
            ));
            if let Some(pricing) = &competitor.pricing {
                html.push_str(&format!("<p>Pricing: {}</p>", escape_html(pricing)));
            }
            if let Some(share) = &competitor.market_share {
                html.push_str(&format!("<p>Market share: {}</p>", escape_html(share)));
            }
            html.push_str(&list_items(&competitor.key_features));
            html.push_str("</div>");
        }
        html.push_str("</section>");
    }

    if let Some(strategy) = evaluation.market_strategy() {
        html.push_str(r#"<section class="report__section"><h3>Market strategy</h3>"#);
        for (heading, body) in [
            ("Target audience", &strategy.target_audience),
            ("Go to market", &strategy.go_to_market),
            ("Revenue model", &strategy.revenue_model),
        ] {
            html.push_str(&format!("<h4>{}</h4><p>{}</p>", heading, escape_html(body)));
        }
        html.push_str("</section>");
    }

    if let Some(deck) = evaluation.pitch_deck() {
        html.push_str(r#"<section class="report__section"><h3>Pitch deck</h3><ol class="report__slides">"#);
        for (name, body) in deck.slides() {
            if !body.is_empty() {
                html.push_str(&format!("<li><strong>{}</strong>: {}</li>", name, escape_html(body)));
            }
        }
        html.push_str("</ol></section>");
    }

    html.push_str("</article>");
    html
}

fn text_section(heading: &str, body: &str) -> String {
    format!(
        r#"<section class="report__section"><h3>{}</h3><p>{}</p></section>"#,
        heading,
        escape_html(body)
    )
}

fn list_block(heading: &str, items: &[String]) -> String {
    format!(
        r#"<div class="report__list"><h4>{}</h4>{}</div>"#,
        heading,
        list_items(items)
    )
}

fn list_items(items: &[String]) -> String {
    let items: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .collect();
    format!("<ul>{}</ul>", items)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use ideanest_app::application::LlmBackend;
    use ideanest_app::infrastructure::gemini::GeminiClient;
    use ideanest_app::infrastructure::history::{HistoryStore, MemoryHistory};
    use serde_json::json;
    use tower::ServiceExt;

    fn context() -> AppContext {
        let backend = LlmBackend::Gemini(GeminiClient::new("test-key".to_string(), None).unwrap());
        AppContext::new(backend, HistoryStore::Memory(MemoryHistory::new()), 150)
    }

    async fn send(request: Request<Body>) -> (StatusCode, String) {
        let response = router::<()>(context()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_posted_form_reaches_validation() {
        let request = Request::builder()
            .method("POST")
            .uri("/evaluate")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("idea_title=FarmCold&idea_description=too+short&user_id="))
            .unwrap();

        let (status, page) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(page.contains("at least 150 characters"));
    }

    #[tokio::test]
    async fn test_query_form_requires_fields() {
        let request = Request::builder()
            .uri("/evaluate?idea_title=FarmCold")
            .body(Body::empty())
            .unwrap();

        let (status, page) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(page.contains("Idea title and description are required"));
    }

    fn record(extra: serde_json::Value) -> EvaluationRecord {
        let mut value = json!({
            "problemStatement": "Spoilage <costs> farmers",
            "pitchSummary": "Cold storage as a service",
            "swotAnalysis": { "strengths": ["cheap"], "weaknesses": [], "opportunities": [], "threats": [] },
            "scores": { "innovation": 8, "feasibility": 7, "scalability": 9 }
        });
        for (key, field) in extra.as_object().unwrap() {
            value[key] = field.clone();
        }
        EvaluationRecord::from_stored(value).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<b>"Tom" & 'Jerry'</b>"#), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
    }

    #[test]
    fn test_report_escapes_model_text() {
        let html = render_report("FarmCold", &record(json!({})));
        assert!(html.contains("Spoilage &lt;costs&gt; farmers"));
        assert!(html.contains("<li>cheap</li>"));
        assert!(html.contains("8.0 / 10"));
    }

    #[test]
    fn test_optional_sections_only_when_present() {
        let bare = render_report("FarmCold", &record(json!({})));
        assert!(!bare.contains("Refined versions"));
        assert!(!bare.contains("Competitors"));
        assert!(!bare.contains("Market strategy"));
        assert!(!bare.contains("Pitch deck"));

        let full = render_report(
            "FarmCold",
            &record(json!({
                "refinedVersions": [{ "title": "Co-op", "description": "d", "whyItWorks": "w" }],
                "competitors": [{ "name": "ColdHubs", "description": "Nigeria", "keyFeatures": ["solar"] }],
                "marketStrategy": { "targetAudience": "farmers", "goToMarket": "co-ops", "revenueModel": "fees" },
                "pitchDeck": { "problem": "spoilage", "ask": "$500k" }
            })),
        );
        assert!(full.contains("Refined versions"));
        assert!(full.contains("<h4>ColdHubs</h4>"));
        assert!(!full.contains("Pricing:"));
        assert!(full.contains("Market strategy"));
        assert!(full.contains("$500k"));
    }

    #[test]
    fn test_saved_report_replaces_url() {
        let id = Uuid::new_v4();
        let page = render_report_page("FarmCold", &record(json!({})), Some(id));
        assert!(page.contains(&format!("/evaluation/{id}")));

        let page = render_report_page("FarmCold", &record(json!({})), None);
        assert!(!page.contains("replaceState"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let page = render_error_page("<script>");
        assert!(page.contains("&lt;script&gt;"));
    }
}
