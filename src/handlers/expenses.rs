// src/handlers/expenses.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::validate_positive,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{ManagerOrAbove, RequireRole},
    },
    models::finance::Expense,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpensePayload {
    pub category: Option<String>,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-08-01")]
    pub incurred_on: NaiveDate,

    pub store_id: Option<i32>,
}

// POST /api/expenses
#[utoipa::path(
    post,
    path = "/api/expenses",
    tag = "Finance",
    request_body = CreateExpensePayload,
    responses(
        (status = 201, description = "Despesa registrada", body = Expense)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_expense(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequireRole<ManagerOrAbove>,
    Json(payload): Json<CreateExpensePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let caller = user.0.caller();
    let store_id = caller
        .resolve_store(payload.store_id)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    // Handler simples: fala direto com o repositório
    let expense = app_state
        .expense_repo
        .create(
            &app_state.db_pool,
            store_id,
            user.0.id,
            payload.category.as_deref(),
            &payload.description,
            payload.amount,
            payload.incurred_on,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(expense)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseListQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

// GET /api/expenses
#[utoipa::path(
    get,
    path = "/api/expenses",
    tag = "Finance",
    params(ExpenseListQuery),
    responses(
        (status = 200, description = "Despesas do escopo do caller", body = Vec<Expense>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_expenses(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequireRole<ManagerOrAbove>,
    Query(query): Query<ExpenseListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.0.caller();
    let expenses = app_state
        .expense_repo
        .list(&app_state.db_pool, &caller, query.from, query.to)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(expenses)))
}
