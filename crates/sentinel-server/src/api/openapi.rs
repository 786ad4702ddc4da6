//! OpenAPI document served at `/openapi.json`.
//!
//! The security schemes are descriptive only; no route enforces them.

use axum::Json;
use sentinel_analytics::{AuthorRow, BrandHealth, Direction, KeywordRow, ResultSummary};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::{metrics, ApiError};

#[derive(OpenApi)]
#[openapi(
    info(title = "SENTINEL", description = "Sentimen Analitik"),
    paths(
        metrics::top_authors,
        metrics::top_keywords,
        metrics::mentions_over_time,
        metrics::mentions_by_sentiment,
        metrics::brand_health,
        metrics::result_summary,
    ),
    components(schemas(ApiError, AuthorRow, KeywordRow, BrandHealth, ResultSummary, Direction)),
    modifiers(&SecurityAddon),
    tags((name = "metrics", description = "Mention analytics for one project over a date window"))
)]
pub(super) struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("bearer")
                    .description(Some("Access Token Bearer"))
                    .build(),
            ),
        );
        components.add_security_scheme(
            "ApiKeyAuth",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-api-key"))),
        );
    }
}

pub(super) async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
