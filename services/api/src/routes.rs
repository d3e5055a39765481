use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use jobhunt_ai::workflows::matching::{matching_router, ApplicationLog, JobPipeline, Notifier};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_matching_routes<L, N>(pipeline: Arc<JobPipeline<L, N>>) -> axum::Router
where
    L: ApplicationLog + 'static,
    N: Notifier + 'static,
{
    matching_router(pipeline)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_engine;
    use crate::infra::{InMemoryApplicationLog, InMemoryNotifier};
    use axum::body::Body;
    use axum::http::Request;
    use jobhunt_ai::workflows::matching::PipelineOptions;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn router(ready: bool) -> axum::Router {
        let pipeline = Arc::new(JobPipeline::new(
            Arc::new(demo_engine().expect("demo profile is valid")),
            Arc::new(InMemoryApplicationLog::default()),
            Arc::new(InMemoryNotifier::default()),
            PipelineOptions::default(),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_matching_routes(pipeline).layer(Extension(state))
    }

    async fn status_of(router: axum::Router, uri: &str) -> StatusCode {
        router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn health_is_always_ok() {
        assert_eq!(status_of(router(false), "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        assert_eq!(
            status_of(router(false), "/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(status_of(router(true), "/ready").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_render_as_text() {
        assert_eq!(status_of(router(true), "/metrics").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn matching_routes_are_mounted() {
        assert_eq!(
            status_of(router(true), "/api/v1/matching/applications").await,
            StatusCode::OK
        );
    }
}
