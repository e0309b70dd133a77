use crate::models::MonthlyReport;
use crate::service::{ReportError, ReportService};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use common::{period::Period, AppState};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ReportError::InvalidPeriod(msg) => (StatusCode::BAD_REQUEST, msg),
            ReportError::Infrastructure(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": msg }))).into_response()
    }
}

#[derive(Deserialize)]
pub struct PeriodQuery {
    pub month: Option<String>,
    pub year: Option<i32>,
}

pub fn reports_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/monthly", get(monthly_report))
        .with_state(state)
}

async fn monthly_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<MonthlyReport>, ReportError> {
    let period = Period::require(params.month.as_deref(), params.year)
        .map_err(ReportError::InvalidPeriod)?;
    let report = ReportService::monthly_report(&state.db, &period).await?;
    Ok(Json(report))
}
