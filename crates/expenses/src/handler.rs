use crate::models::{Expense, RawCreateExpenseRequest};
use crate::service::{ExpenseError, ExpenseService};
use crate::summary::{CategorySummary, MonthlyPoint};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use common::{period::Period, AppState};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

impl IntoResponse for ExpenseError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ExpenseError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            ExpenseError::NotFound => (StatusCode::NOT_FOUND, "Expense not found".to_string()),
            ExpenseError::Infrastructure(_) => (
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

pub fn expenses_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_expenses).post(create_expense))
        .route("/summary/category", get(category_summary))
        .route("/summary/monthly", get(monthly_summary))
        .route(
            "/{id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
        .with_state(state)
}

async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<Vec<Expense>>, ExpenseError> {
    let period = Period::from_optional(params.month.as_deref(), params.year)
        .map_err(ExpenseError::InvalidInput)?;
    let expenses = ExpenseService::list_expenses(&state.db, period).await?;
    Ok(Json(expenses))
}

async fn get_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Expense>, ExpenseError> {
    let expense = ExpenseService::get_expense(&state.db, id).await?;
    Ok(Json(expense))
}

async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RawCreateExpenseRequest>,
) -> Result<impl IntoResponse, ExpenseError> {
    let expense = ExpenseService::create_expense(
        &state.db,
        payload.amount,
        payload.category,
        payload.description,
        payload.date,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

async fn update_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<RawCreateExpenseRequest>,
) -> Result<Json<Expense>, ExpenseError> {
    let expense = ExpenseService::update_expense(
        &state.db,
        id,
        payload.amount,
        payload.category,
        payload.description,
        payload.date,
    )
    .await?;

    Ok(Json(expense))
}

async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ExpenseError> {
    ExpenseService::delete_expense(&state.db, id).await?;
    Ok(Json(json!({ "message": "Expense deleted successfully", "id": id })))
}

async fn category_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<Vec<CategorySummary>>, ExpenseError> {
    let period = Period::from_optional(params.month.as_deref(), params.year)
        .map_err(ExpenseError::InvalidInput)?;
    let summary = ExpenseService::category_summary(&state.db, period).await?;
    Ok(Json(summary))
}

async fn monthly_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MonthlyPoint>>, ExpenseError> {
    let points = ExpenseService::monthly_summary(&state.db).await?;
    Ok(Json(points))
}
