//! Axum route handlers.
//!
//! # Routes
//!
//! - `GET  /health`            — Returns `{"status": "ok", "version": ..., "service": "solace"}`
//! - `POST /analyze`           — `{ "text": ... }` → `TurnView`
//! - `POST /prompts/analysis`  — `{ "message": ... }` → `{ "prompt": ... }`
//! - `POST /prompts/reply`     — `{ "analysis": ... }` → `{ "prompt": ..., "style": ... }`
//! - `POST /reply/format`      — `{ "analysis": ..., "reply": ... }` → `{ "text": ..., "style": ... }`

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::analysis;
use crate::config::PresenterConfig;
use crate::prompts::{PromptLibrary, ReplyPlan, ReplyStyle};
use crate::session::TurnView;
use crate::utilities::errors::PromptError;

type ApiError = (StatusCode, Json<Value>);

/// Shared application state for the HTTP server.
#[derive(Clone, Default)]
pub struct AppState {
    pub presenter: Arc<PresenterConfig>,
    pub prompts: Arc<PromptLibrary>,
}

impl AppState {
    pub fn new(presenter: PresenterConfig, prompts: PromptLibrary) -> Self {
        Self {
            presenter: Arc::new(presenter),
            prompts: Arc::new(prompts),
        }
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/analyze", post(analyze_handler))
        .route("/prompts/analysis", post(analysis_prompt_handler))
        .route("/prompts/reply", post(reply_prompt_handler))
        .route("/reply/format", post(format_reply_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisPromptRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptResponse {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct ReplyPromptRequest {
    pub analysis: String,
}

#[derive(Debug, Deserialize)]
pub struct FormatReplyRequest {
    pub analysis: String,
    pub reply: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FormattedReply {
    pub text: String,
    pub style: ReplyStyle,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /health — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "solace",
    }))
}

/// POST /analyze — parse an analysis response and derive its artifacts.
///
/// Malformed text is not a request error: the view carries an errored report
/// and unavailable charts.
async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<TurnView> {
    let view = TurnView::from_analysis(&request.text, &state.presenter);
    if let Some(reason) = view.report.malformed {
        tracing::debug!("Analysis response unusable: {}", reason);
    }
    Json(view)
}

/// POST /prompts/analysis — render the analysis prompt for a user message.
async fn analysis_prompt_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalysisPromptRequest>,
) -> Result<Json<PromptResponse>, ApiError> {
    let prompt = state
        .prompts
        .analysis_prompt(&request.message)
        .map_err(prompt_error)?;
    Ok(Json(PromptResponse { prompt }))
}

/// POST /prompts/reply — render the reply prompt, choosing crisis or
/// standard mode from the analysis.
async fn reply_prompt_handler(
    State(state): State<AppState>,
    Json(request): Json<ReplyPromptRequest>,
) -> Result<Json<ReplyPlan>, ApiError> {
    let plan = state
        .prompts
        .plan_reply(&request.analysis)
        .map_err(prompt_error)?;
    if plan.style.is_crisis() {
        tracing::warn!("Crisis reply protocol selected");
    }
    Ok(Json(plan))
}

/// POST /reply/format — prepare a generated reply for display.
async fn format_reply_handler(
    State(state): State<AppState>,
    Json(request): Json<FormatReplyRequest>,
) -> Result<Json<FormattedReply>, ApiError> {
    let style = ReplyStyle::for_report(&analysis::parse(&request.analysis));
    let text = state
        .prompts
        .format_reply(&request.reply, style)
        .map_err(prompt_error)?;
    Ok(Json(FormattedReply { text, style }))
}

fn prompt_error(e: PromptError) -> ApiError {
    let status = match e {
        PromptError::EmptyInput(_) => StatusCode::BAD_REQUEST,
        _ => {
            tracing::error!("Prompt rendering failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(serde_json::json!({ "error": e.to_string() })))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = app_router(AppState::default());

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], crate::VERSION);
        assert_eq!(json["service"], "solace");
    }

    #[tokio::test]
    async fn test_analyze_returns_artifacts() {
        let app = app_router(AppState::default());
        let text = "Top 3 Emotions: [Anxiety: 60%, Sadness: 30%, Other: 10%]\n\
                    Overall Intensity: 7\n\
                    Risk Indicators: No specific risk indicators detected";

        let (status, json) = post_json(app, "/analyze", serde_json::json!({ "text": text })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["gauge"]["kind"], "gauge");
        assert_eq!(json["gauge"]["value"], 7);
        assert_eq!(json["gauge"]["zone"], "high");
        assert_eq!(json["breakdown"]["kind"], "breakdown");
        assert_eq!(json["breakdown"]["segments"][1]["label"], "Sadness");
        assert_eq!(json["breakdown"]["total"], 100);
        assert_eq!(json["reply_style"], "standard");
        assert_eq!(json["report"]["risk"]["state"], "clear");
    }

    #[tokio::test]
    async fn test_analyze_malformed_text_is_not_an_error() {
        let app = app_router(AppState::default());
        let (status, json) =
            post_json(app, "/analyze", serde_json::json!({ "text": "no labels here" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["report"]["malformed"], "missing_marker");
        assert_eq!(json["gauge"]["kind"], "unavailable");
        assert_eq!(json["gauge"]["message"], "Intensity N/A");
        assert_eq!(json["breakdown"]["kind"], "unavailable");
    }

    #[tokio::test]
    async fn test_analysis_prompt_endpoint() {
        let app = app_router(AppState::default());
        let (status, json) = post_json(
            app,
            "/prompts/analysis",
            serde_json::json!({ "message": "I feel alone" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["prompt"].as_str().unwrap().contains("Input Message: I feel alone"));
    }

    #[tokio::test]
    async fn test_analysis_prompt_rejects_empty_message() {
        let app = app_router(AppState::default());
        let (status, json) =
            post_json(app, "/prompts/analysis", serde_json::json!({ "message": "" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("message"));
    }

    #[tokio::test]
    async fn test_reply_prompt_selects_crisis() {
        let app = app_router(AppState::default());
        let (status, json) = post_json(
            app,
            "/prompts/reply",
            serde_json::json!({ "analysis": "Risk Indicators: Suicidal ideation mentioned" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["style"], "crisis");
        assert!(json["prompt"].as_str().unwrap().contains("CRISIS PROTOCOL"));
    }

    #[tokio::test]
    async fn test_format_reply_endpoint() {
        let app = app_router(AppState::default());
        let (status, json) = post_json(
            app,
            "/reply/format",
            serde_json::json!({
                "analysis": "Risk Indicators: No specific risk indicators detected",
                "reply": "Error: It makes sense to feel this way.",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["style"], "standard");
        assert_eq!(json["text"], "It makes sense to feel this way.");
    }
}
