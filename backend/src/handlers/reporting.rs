//! Dashboard, needs analysis and insights handlers

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use shared::insights::{parse_insights, InsightSection};

use crate::error::AppResult;
use crate::models::AnalysisQuery;
use crate::services::reporting::{DashboardSummary, ReportingService};
use crate::AppState;

#[derive(Serialize)]
pub struct InsightsResponse {
    pub text: String,
    pub sections: Vec<InsightSection>,
}

/// Get dashboard metrics
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardSummary>> {
    let service = ReportingService::new(state.store.clone());
    let summary = service.dashboard(state.config.dashboard.chart_top_n).await?;
    Ok(Json(summary))
}

/// Needs-vs-stock analysis, as JSON or CSV
pub async fn get_analysis(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.store.clone());
    let report = service.analysis(query.group_by).await?;

    if query.format.as_deref() == Some("csv") {
        let csv = ReportingService::export_to_csv(&report)?;
        let disposition = format!(
            "attachment; filename=\"{}\"",
            ReportingService::export_filename(report.group_by)
        );
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(report).into_response())
    }
}

/// Generate dashboard insights
pub async fn generate_insights(State(state): State<AppState>) -> AppResult<Json<InsightsResponse>> {
    let service = ReportingService::new(state.store.clone());
    let summary = service.insights_summary().await?;
    let text = state.insights.generate(&summary).await?;

    Ok(Json(InsightsResponse {
        sections: parse_insights(&text),
        text,
    }))
}
