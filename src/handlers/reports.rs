// src/handlers/reports.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{ManagerOrAbove, RequireRole},
    },
    models::reports::{SalesChartEntry, SummaryReport, TopProductEntry},
};

// GET /api/reports/summary
#[utoipa::path(
    get,
    path = "/api/reports/summary",
    tag = "Reports",
    responses(
        (status = 200, description = "Indicadores do dia (escopo do caller)", body = SummaryReport),
        (status = 403, description = "Apenas gerência")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequireRole<ManagerOrAbove>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.0.caller();
    let summary = app_state
        .report_service
        .summary(&caller)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/reports/sales-chart
#[utoipa::path(
    get,
    path = "/api/reports/sales-chart",
    tag = "Reports",
    responses(
        (status = 200, description = "Vendas por dia, últimos 30 dias", body = Vec<SalesChartEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sales_chart(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequireRole<ManagerOrAbove>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.0.caller();
    let chart = app_state
        .report_service
        .sales_chart(&caller)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(chart)))
}

// GET /api/reports/top-products
#[utoipa::path(
    get,
    path = "/api/reports/top-products",
    tag = "Reports",
    responses(
        (status = 200, description = "Ranking dos produtos por receita (Curva ABC)", body = Vec<TopProductEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_top_products(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequireRole<ManagerOrAbove>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.0.caller();
    let products = app_state
        .report_service
        .top_products(&caller)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(products)))
}
