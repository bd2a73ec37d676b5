//! JSON endpoints under `/v1`, plus the health probe.

use crate::client_addr::ClientAddr;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use ideanest_app::domain::{EvaluationRecord, HistoryEntry};
use ideanest_app::AppContext;
use ideanest_errors::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    #[serde(default)]
    idea_title: String,
    #[serde(default)]
    idea_description: String,
    #[serde(default)]
    user_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EvaluateResponse {
    success: bool,
    data: EvaluationRecord,
    evaluation_id: Option<Uuid>,
}

#[derive(Serialize)]
struct DataResponse<T> {
    success: bool,
    data: T,
}

#[derive(Serialize)]
struct MessageResponse {
    success: bool,
    message: &'static str,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

pub fn router<S>(ctx: AppContext) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/v1/evaluate", post(evaluate))
        .route("/v1/history/{user_id}", get(history))
        .route("/v1/evaluation/{id}", get(evaluation).delete(delete_evaluation))
        .with_state(ctx)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

async fn evaluate(
    State(ctx): State<AppContext>,
    ClientAddr(ip): ClientAddr,
    body: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!("Rejected evaluate body: {}", rejection.body_text());
        AppError::InvalidInput(
            "Request body must be a JSON object with ideaTitle and ideaDescription".to_string(),
        )
    })?;

    let outcome = ctx
        .evaluate(
            ip,
            &body.idea_title,
            &body.idea_description,
            body.user_id.as_deref(),
        )
        .await?;

    Ok(Json(EvaluateResponse {
        success: true,
        data: outcome.evaluation,
        evaluation_id: outcome.evaluation_id,
    }))
}

async fn history(
    State(ctx): State<AppContext>,
    Path(user_id): Path<String>,
) -> Result<Json<DataResponse<Vec<HistoryEntry>>>, AppError> {
    let entries = ctx.history_for(&user_id).await?;
    Ok(Json(DataResponse {
        success: true,
        data: entries,
    }))
}

async fn evaluation(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<HistoryEntry>>, AppError> {
    let entry = ctx.find_evaluation(&id).await?;
    Ok(Json(DataResponse {
        success: true,
        data: entry,
    }))
}

async fn delete_evaluation(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    ctx.delete_evaluation(&id).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Evaluation deleted successfully",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use ideanest_app::application::LlmBackend;
    use ideanest_app::infrastructure::gemini::GeminiClient;
    use ideanest_app::infrastructure::history::{HistoryStore, MemoryHistory};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn context() -> AppContext {
        let backend = LlmBackend::Gemini(GeminiClient::new("test-key".to_string(), None).unwrap());
        AppContext::new(backend, HistoryStore::Memory(MemoryHistory::new()), 150)
    }

    async fn send(ctx: &AppContext, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = router::<()>(ctx.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn record() -> EvaluationRecord {
        EvaluationRecord::from_stored(json!({
            "pitchSummary": "p",
            "scores": { "innovation": 8, "feasibility": 7, "scalability": 9 }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&context(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_evaluate_rejects_short_description() {
        let (status, body) = send(
            &context(),
            Method::POST,
            "/v1/evaluate",
            Some(json!({ "ideaTitle": "FarmCold", "ideaDescription": "too short" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("150"));
    }

    #[tokio::test]
    async fn test_evaluate_requires_both_fields() {
        let (status, body) = send(&context(), Method::POST, "/v1/evaluate", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Idea title and description are required");
    }

    #[tokio::test]
    async fn test_malformed_body_gets_json_error() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/v1/evaluate")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"ideaTitle": "FarmCold","#))
            .unwrap();

        let response = router::<()>(context()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("JSON object"));
    }

    #[tokio::test]
    async fn test_history_get_and_delete() {
        let ctx = context();
        let id = ctx.history.save("user_1", "FarmCold", "desc", record()).await.unwrap();

        let (status, body) = send(&ctx, Method::GET, "/v1/history/user_1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["ideaTitle"], "FarmCold");
        assert_eq!(body["data"][0]["evaluationData"]["pitchSummary"], "p");

        let uri = format!("/v1/evaluation/{id}");
        let (status, body) = send(&ctx, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["userId"], "user_1");

        let (status, body) = send(&ctx, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = send(&ctx, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_unknown_evaluation_is_not_found() {
        let uri = format!("/v1/evaluation/{}", Uuid::new_v4());
        let (status, _) = send(&context(), Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
