mod metrics;
mod openapi;
mod params;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, MethodRouter},
    Extension, Json, Router,
};
use sentinel_search::{ElasticClient, SearchError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::ToSchema;

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

use self::params::FieldErrors;

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<ElasticClient>,
}

/// Envelope shared by every successful response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub code: u16,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            code: StatusCode::OK.as_u16(),
            data,
            message: Some("Success".to_string()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    pub ok: bool,
    pub code: u16,
    /// Machine-readable code such as `validation_error` or `upstream_error`.
    pub error: String,
    pub message: String,
    /// Field name to message, present on validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<std::collections::BTreeMap<String, String>>)]
    pub errors: Option<FieldErrors>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    search: &'static str,
}

#[derive(Debug, Serialize)]
struct VersionData {
    version: &'static str,
}

impl ApiError {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        let error = error.into();
        let status = match error.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" => StatusCode::BAD_REQUEST,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            "upstream_timeout" => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            ok: false,
            code: status.as_u16(),
            error,
            message: message.into(),
            errors: None,
        }
    }

    pub(super) fn validation(errors: FieldErrors) -> Self {
        Self {
            errors: Some(errors),
            ..Self::new("validation_error", "request validation failed")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Upstream details are logged, never returned to the client.
pub(super) fn map_search_error(req_id: &RequestId, error: &SearchError) -> ApiError {
    tracing::error!(request_id = %req_id.0, error = %error, "search query failed");
    if error.is_timeout() {
        ApiError::new("upstream_timeout", "search engine timed out")
    } else {
        ApiError::new("upstream_error", "search engine request failed")
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
}

/// Every metric is served on the project route and on its legacy selector route.
fn metric_routes() -> Router<AppState> {
    let metrics: [(&str, MethodRouter<AppState>); 6] = [
        ("top-authors", get(metrics::top_authors)),
        ("top-keywords", get(metrics::top_keywords)),
        ("mention-in-time-chart", get(metrics::mentions_over_time)),
        (
            "mention-in-time-by-sentiment-chart",
            get(metrics::mentions_by_sentiment),
        ),
        ("brand-health-index", get(metrics::brand_health)),
        ("result-summary", get(metrics::result_summary)),
    ];

    metrics
        .into_iter()
        .fold(Router::new(), |router, (name, handler)| {
            router
                .route(
                    &format!("/api/v1/projects/{{project_id}}/{name}"),
                    handler.clone(),
                )
                .route(&format!("/{name}/{{selector}}"), handler)
        })
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(metric_routes())
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn index() -> Json<ApiResponse<VersionData>> {
    Json(ApiResponse::success(VersionData {
        version: env!("CARGO_PKG_VERSION"),
    }))
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    match state.search.ping().await {
        Ok(info) => {
            tracing::debug!(cluster = %info.cluster_name, "health check: search reachable");
            (
                StatusCode::OK,
                Json(ApiResponse::success(HealthData {
                    status: "ok",
                    search: "ok",
                })),
            )
        }
        Err(e) => {
            tracing::warn!(request_id = %req_id.0, error = %e, "health check: search unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    ok: false,
                    code: StatusCode::SERVICE_UNAVAILABLE.as_u16(),
                    data: HealthData {
                        status: "degraded",
                        search: "unavailable",
                    },
                    message: Some("search engine unavailable".to_string()),
                }),
            )
        }
    }
}

async fn not_found() -> ApiError {
    ApiError::new("not_found", "route not found")
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
