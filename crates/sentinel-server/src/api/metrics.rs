use std::collections::{BTreeMap, HashMap};

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use sentinel_analytics::{AuthorRow, BrandHealth, KeywordRow, ResultSummary};

use crate::middleware::RequestId;

use super::params::{resolve, FieldErrors, MetricParams, MetricRequest};
use super::{map_search_error, ApiError, ApiResponse, AppState};

type PathParams = Result<Path<HashMap<String, String>>, PathRejection>;
type QueryParams = Result<Query<MetricParams>, QueryRejection>;

/// Extractor rejections are folded into the same field-error envelope as
/// semantic validation failures.
fn request(
    req_id: &RequestId,
    path: PathParams,
    query: QueryParams,
) -> Result<MetricRequest, ApiError> {
    let Path(path) =
        path.map_err(|r| rejected(req_id, FieldErrors::from([("path".into(), r.body_text())])))?;
    let Query(params) =
        query.map_err(|r| rejected(req_id, FieldErrors::from([("query".into(), r.body_text())])))?;
    resolve(&path, &params).map_err(|errors| rejected(req_id, errors))
}

fn rejected(req_id: &RequestId, errors: FieldErrors) -> ApiError {
    tracing::debug!(request_id = %req_id.0, ?errors, "rejected metric request");
    ApiError::validation(errors)
}

#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/top-authors",
    tag = "metrics",
    params(("project_id" = String, Path, description = "Project identifier"), MetricParams),
    responses(
        (status = 200, description = "Authors ranked by follower count", body = ApiResponse<Vec<AuthorRow>>),
        (status = 400, description = "Invalid path or query parameters", body = ApiError),
        (status = 502, description = "Search engine request failed", body = ApiError),
        (status = 504, description = "Search engine timed out", body = ApiError),
    )
)]
pub(super) async fn top_authors(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    path: PathParams,
    query: QueryParams,
) -> Result<Json<ApiResponse<Vec<AuthorRow>>>, ApiError> {
    let req = request(&req_id, path, query)?;
    let rows = sentinel_analytics::top_authors(state.search.as_ref(), &req.scope, req.limit)
        .await
        .map_err(|e| map_search_error(&req_id, &e))?;
    Ok(Json(ApiResponse::success(rows)))
}

#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/top-keywords",
    tag = "metrics",
    params(("project_id" = String, Path, description = "Project identifier"), MetricParams),
    responses(
        (status = 200, description = "Most frequent non-stopword tokens", body = ApiResponse<Vec<KeywordRow>>),
        (status = 400, description = "Invalid path or query parameters", body = ApiError),
        (status = 502, description = "Search engine request failed", body = ApiError),
        (status = 504, description = "Search engine timed out", body = ApiError),
    )
)]
pub(super) async fn top_keywords(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    path: PathParams,
    query: QueryParams,
) -> Result<Json<ApiResponse<Vec<KeywordRow>>>, ApiError> {
    let req = request(&req_id, path, query)?;
    let rows = sentinel_analytics::top_keywords(state.search.as_ref(), &req.scope, req.limit)
        .await
        .map_err(|e| map_search_error(&req_id, &e))?;
    Ok(Json(ApiResponse::success(rows)))
}

#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/mention-in-time-chart",
    tag = "metrics",
    params(("project_id" = String, Path, description = "Project identifier"), MetricParams),
    responses(
        (status = 200, description = "Mention count keyed by creation timestamp", body = ApiResponse<BTreeMap<String, u64>>),
        (status = 400, description = "Invalid path or query parameters", body = ApiError),
        (status = 502, description = "Search engine request failed", body = ApiError),
        (status = 504, description = "Search engine timed out", body = ApiError),
    )
)]
pub(super) async fn mentions_over_time(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    path: PathParams,
    query: QueryParams,
) -> Result<Json<ApiResponse<BTreeMap<String, u64>>>, ApiError> {
    let req = request(&req_id, path, query)?;
    let series = sentinel_analytics::mentions_over_time(state.search.as_ref(), &req.scope)
        .await
        .map_err(|e| map_search_error(&req_id, &e))?;
    Ok(Json(ApiResponse::success(series)))
}

#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/mention-in-time-by-sentiment-chart",
    tag = "metrics",
    params(("project_id" = String, Path, description = "Project identifier"), MetricParams),
    responses(
        (status = 200, description = "One single-entry table per sentiment label", body = ApiResponse<Vec<BTreeMap<String, u64>>>),
        (status = 400, description = "Invalid path or query parameters", body = ApiError),
        (status = 502, description = "Search engine request failed", body = ApiError),
        (status = 504, description = "Search engine timed out", body = ApiError),
    )
)]
pub(super) async fn mentions_by_sentiment(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    path: PathParams,
    query: QueryParams,
) -> Result<Json<ApiResponse<Vec<BTreeMap<&'static str, u64>>>>, ApiError> {
    let req = request(&req_id, path, query)?;
    let tables = sentinel_analytics::mentions_by_sentiment(state.search.as_ref(), &req.scope)
        .await
        .map_err(|e| map_search_error(&req_id, &e))?;
    Ok(Json(ApiResponse::success(tables)))
}

#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/brand-health-index",
    tag = "metrics",
    params(("project_id" = String, Path, description = "Project identifier"), MetricParams),
    responses(
        (status = 200, description = "Positive share of polarized mentions", body = ApiResponse<BrandHealth>),
        (status = 400, description = "Invalid path or query parameters", body = ApiError),
        (status = 502, description = "Search engine request failed", body = ApiError),
        (status = 504, description = "Search engine timed out", body = ApiError),
    )
)]
pub(super) async fn brand_health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    path: PathParams,
    query: QueryParams,
) -> Result<Json<ApiResponse<BrandHealth>>, ApiError> {
    let req = request(&req_id, path, query)?;
    let health = sentinel_analytics::brand_health(state.search.as_ref(), &req.scope)
        .await
        .map_err(|e| map_search_error(&req_id, &e))?;
    Ok(Json(ApiResponse::success(health)))
}

#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/result-summary",
    tag = "metrics",
    params(("project_id" = String, Path, description = "Project identifier"), MetricParams),
    responses(
        (status = 200, description = "Counts with change against the prior window", body = ApiResponse<ResultSummary>),
        (status = 400, description = "Invalid path or query parameters", body = ApiError),
        (status = 502, description = "Search engine request failed", body = ApiError),
        (status = 504, description = "Search engine timed out", body = ApiError),
    )
)]
pub(super) async fn result_summary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    path: PathParams,
    query: QueryParams,
) -> Result<Json<ApiResponse<ResultSummary>>, ApiError> {
    let req = request(&req_id, path, query)?;
    let summary = sentinel_analytics::result_summary(state.search.as_ref(), &req.scope)
        .await
        .map_err(|e| map_search_error(&req_id, &e))?;
    Ok(Json(ApiResponse::success(summary)))
}
