use crate::infra::{AppState, ReportQuery};
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use crime_intel::error::AppError;
use crime_intel::reports::analytics::{BreakdownEntry, DEFAULT_TOP_REGIONS};
use crime_intel::reports::domain::format_timestamp;
use crime_intel::reports::{export, filter, sort, summarize, FeedStatus, Report, ReportAnalytics};
use serde::Serialize;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReportListResponse {
    pub(crate) total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) refreshed_at: Option<String>,
    pub(crate) reports: Vec<Report>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyticsResponse {
    #[serde(flatten)]
    pub(crate) analytics: ReportAnalytics,
    pub(crate) top_regions: Vec<BreakdownEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) dominant_category: Option<BreakdownEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshResponse {
    pub(crate) refreshed_at: Option<String>,
    pub(crate) cached_reports: usize,
}

pub(crate) fn report_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/reports", get(list_reports_endpoint))
        .route("/api/v1/reports/analytics", get(analytics_endpoint))
        .route("/api/v1/reports/export", get(export_endpoint))
        .route("/api/v1/feed/status", get(feed_status_endpoint))
        .route("/api/v1/feed/refresh", post(feed_refresh_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
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

/// Applies the query's filters to the current snapshot.
fn filtered(
    state: &AppState,
    query: &ReportQuery,
) -> Result<(Vec<Report>, Option<DateTime<Utc>>), AppError> {
    let criteria = query.criteria()?;
    let snapshot = state.feed.snapshot();
    Ok((filter(&snapshot.reports, &criteria), snapshot.refreshed_at))
}

pub(crate) async fn list_reports_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportListResponse>, AppError> {
    let (key, direction) = query.ordering()?;
    let (reports, refreshed_at) = filtered(&state, &query)?;
    let reports = sort(&reports, key, direction);

    Ok(Json(ReportListResponse {
        total: reports.len(),
        refreshed_at: refreshed_at.as_ref().map(format_timestamp),
        reports,
    }))
}

pub(crate) async fn analytics_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let (reports, _) = filtered(&state, &query)?;
    let analytics = summarize(&reports);

    let top_regions = analytics
        .top_regions(DEFAULT_TOP_REGIONS)
        .into_iter()
        .map(|(region, count)| BreakdownEntry {
            name: region.label().to_string(),
            value: count,
        })
        .collect();
    let dominant_category = analytics
        .dominant_category()
        .map(|(category, count)| BreakdownEntry {
            name: category.label().to_string(),
            value: count,
        });

    Ok(Json(AnalyticsResponse {
        analytics,
        top_regions,
        dominant_category,
    }))
}

pub(crate) async fn export_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let format = query.export_format()?;
    let (key, direction) = query.ordering()?;
    let (reports, _) = filtered(&state, &query)?;
    let exported = export(&sort(&reports, key, direction), format)?;

    info!(%format, count = reports.len(), "reports exported");

    let disposition = format!("attachment; filename=\"{}\"", exported.file_name());
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, exported.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        exported.body,
    ))
}

pub(crate) async fn feed_status_endpoint(Extension(state): Extension<AppState>) -> Json<FeedStatus> {
    Json(state.feed.status())
}

pub(crate) async fn feed_refresh_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<RefreshResponse>, AppError> {
    let feed = Arc::clone(&state.feed);
    let snapshot = tokio::task::spawn_blocking(move || feed.refresh())
        .await
        .map_err(|err| AppError::Io(std::io::Error::other(err)))??;
    Ok(Json(RefreshResponse {
        refreshed_at: snapshot.refreshed_at.as_ref().map(format_timestamp),
        cached_reports: snapshot.reports.len(),
    }))
}
