use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::JobPosting;
use super::repository::{ApplicationLog, Notifier};
use super::service::JobPipeline;

const DEFAULT_APPLICATION_LIMIT: usize = 20;

/// Router builder exposing HTTP endpoints for evaluation and batch processing.
pub fn matching_router<L, N>(pipeline: Arc<JobPipeline<L, N>>) -> Router
where
    L: ApplicationLog + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route("/api/v1/matching/evaluate", post(evaluate_handler::<L, N>))
        .route("/api/v1/matching/postings", post(posting_handler::<L, N>))
        .route("/api/v1/matching/runs", post(run_handler::<L, N>))
        .route(
            "/api/v1/matching/applications",
            get(applications_handler::<L, N>),
        )
        .with_state(pipeline)
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RunRequest {
    pub(crate) postings: Vec<JobPosting>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplicationsQuery {
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

pub(crate) async fn evaluate_handler<L, N>(
    State(pipeline): State<Arc<JobPipeline<L, N>>>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response
where
    L: ApplicationLog + 'static,
    N: Notifier + 'static,
{
    let evaluation = pipeline
        .engine()
        .evaluate(&request.title, request.description.as_deref());
    (StatusCode::OK, axum::Json(evaluation)).into_response()
}

pub(crate) async fn posting_handler<L, N>(
    State(pipeline): State<Arc<JobPipeline<L, N>>>,
    axum::Json(posting): axum::Json<JobPosting>,
) -> Response
where
    L: ApplicationLog + 'static,
    N: Notifier + 'static,
{
    let processed = tokio::task::spawn_blocking(move || pipeline.process(&posting)).await;
    match processed {
        Ok(Ok(outcome)) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Ok(Err(err)) => error_response(err.to_string()),
        Err(err) => error_response(format!("posting worker failed: {err}")),
    }
}

pub(crate) async fn run_handler<L, N>(
    State(pipeline): State<Arc<JobPipeline<L, N>>>,
    axum::Json(request): axum::Json<RunRequest>,
) -> Response
where
    L: ApplicationLog + 'static,
    N: Notifier + 'static,
{
    match tokio::task::spawn_blocking(move || pipeline.run(&request.postings)).await {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(format!("run worker failed: {err}")),
    }
}

pub(crate) async fn applications_handler<L, N>(
    State(pipeline): State<Arc<JobPipeline<L, N>>>,
    Query(query): Query<ApplicationsQuery>,
) -> Response
where
    L: ApplicationLog + 'static,
    N: Notifier + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_APPLICATION_LIMIT);
    let recent = tokio::task::spawn_blocking(move || pipeline.recent_applications(limit)).await;
    match recent {
        Ok(Ok(records)) => (StatusCode::OK, axum::Json(records)).into_response(),
        Ok(Err(err)) => error_response(err.to_string()),
        Err(err) => error_response(format!("log worker failed: {err}")),
    }
}

fn error_response(message: String) -> Response {
    let payload = json!({
        "error": message,
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
