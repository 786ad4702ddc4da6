//! Request parameter validation shared by every metric route.
//!
//! Metrics are reachable two ways: `/api/v1/projects/{project_id}/<metric>`
//! with `start_date`/`end_date` query parameters, and the dashboard's legacy
//! `/<metric>/{projectId}_{start_date}_{end_date}` selector. Both resolve to
//! the same [`MetricRequest`].

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use sentinel_analytics::Scope;
use sentinel_core::{window::parse_date, CoreError, DateWindow};
use serde::Deserialize;
use utoipa::IntoParams;

pub(super) const MAX_LIMIT: usize = 1000;

/// Field name to validation message.
pub(super) type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(super) struct MetricParams {
    /// Inclusive window start, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Exclusive window end, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    /// Row cap for top-authors and top-keywords, clamped to `1..=1000`.
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct MetricRequest {
    pub scope: Scope,
    pub limit: Option<usize>,
}

pub(super) fn normalize_limit(limit: Option<usize>) -> Option<usize> {
    limit.map(|n| n.clamp(1, MAX_LIMIT))
}

/// Resolves path parameters from either route shape plus the query string.
pub(super) fn resolve(
    path: &HashMap<String, String>,
    params: &MetricParams,
) -> Result<MetricRequest, FieldErrors> {
    if let Some(selector) = path.get("selector") {
        return from_selector(selector, params);
    }
    let project_id = path.get("project_id").map_or("", String::as_str);
    validate(
        project_id,
        params.start_date.as_deref(),
        params.end_date.as_deref(),
        params.limit.as_deref(),
    )
}

/// Splits `{projectId}_{start_date}_{end_date}` from the right so project ids
/// may themselves contain underscores.
fn from_selector(selector: &str, params: &MetricParams) -> Result<MetricRequest, FieldErrors> {
    let mut parts = selector.rsplitn(3, '_');
    let (Some(end), Some(start), Some(project_id)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FieldErrors::from([(
            "selector".to_string(),
            "expected {projectId}_{start_date}_{end_date}".to_string(),
        )]));
    };
    validate(project_id, Some(start), Some(end), params.limit.as_deref())
}

fn validate(
    project_id: &str,
    start_date: Option<&str>,
    end_date: Option<&str>,
    limit: Option<&str>,
) -> Result<MetricRequest, FieldErrors> {
    let mut errors = FieldErrors::new();

    let project_id = project_id.trim();
    if project_id.is_empty() {
        errors.insert("project_id".to_string(), "must not be empty".to_string());
    }

    let start = parse_field("start_date", start_date, &mut errors);
    let end = parse_field("end_date", end_date, &mut errors);

    let window = match (start, end) {
        (Some(start), Some(end)) => match DateWindow::new(start, end) {
            Ok(window) => Some(window),
            Err(e) => {
                errors.insert("end_date".to_string(), e.to_string());
                None
            }
        },
        _ => None,
    };

    let limit = match limit.map(str::trim).filter(|l| !l.is_empty()) {
        None => None,
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) if n > 0 => Some(n),
            _ => {
                errors.insert("limit".to_string(), "must be a positive integer".to_string());
                None
            }
        },
    };

    match window {
        Some(window) if errors.is_empty() => Ok(MetricRequest {
            scope: Scope::new(project_id, window),
            limit: normalize_limit(limit),
        }),
        _ => Err(errors),
    }
}

fn parse_field(
    field: &str,
    value: Option<&str>,
    errors: &mut FieldErrors,
) -> Option<NaiveDate> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        errors.insert(field.to_string(), "field required".to_string());
        return None;
    };
    match parse_date(value) {
        Ok(date) => Some(date),
        Err(CoreError::InvalidDate { .. }) => {
            errors.insert(
                field.to_string(),
                "invalid date, expected YYYY-MM-DD".to_string(),
            );
            None
        }
        Err(e) => {
            errors.insert(field.to_string(), e.to_string());
            None
        }
    }
}
