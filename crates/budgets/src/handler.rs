use crate::compare::BudgetComparison;
use crate::models::{Budget, RawUpsertBudgetRequest};
use crate::service::{BudgetError, BudgetService};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use common::{period::Period, AppState};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

impl IntoResponse for BudgetError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            BudgetError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            BudgetError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            BudgetError::NotFound => (StatusCode::NOT_FOUND, "Budget not found".to_string()),
            BudgetError::Infrastructure(_) => (
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

pub fn budgets_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_budgets).post(upsert_budget))
        .route("/comparison", get(comparison))
        .route("/{id}", delete(delete_budget))
        .with_state(state)
}

async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<Vec<Budget>>, BudgetError> {
    let period = Period::from_optional(params.month.as_deref(), params.year)
        .map_err(BudgetError::InvalidInput)?;
    let budgets = BudgetService::list_budgets(&state.db, period.as_ref()).await?;
    Ok(Json(budgets))
}

async fn upsert_budget(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RawUpsertBudgetRequest>,
) -> Result<impl IntoResponse, BudgetError> {
    let budget = BudgetService::upsert_budget(
        &state.db,
        payload.category,
        payload.amount,
        payload.month,
        payload.year,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(budget)))
}

async fn delete_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, BudgetError> {
    BudgetService::delete_budget(&state.db, id).await?;
    Ok(Json(json!({ "message": "Budget deleted successfully", "id": id })))
}

async fn comparison(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<Vec<BudgetComparison>>, BudgetError> {
    let period = Period::require(params.month.as_deref(), params.year)
        .map_err(BudgetError::InvalidInput)?;
    let comparison = BudgetService::comparison(&state.db, &period).await?;
    Ok(Json(comparison))
}
