// src/handlers/stock.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::{validate_not_negative, validate_positive},
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{AdminOrAbove, RequireRole},
    },
    models::catalog::Product,
    models::inventory::{StockLog, UnitType},
};

// ---
// Payload: ReceiveStock (a entrada que dispara a média ponderada)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveStockPayload {
    pub product_id: i32,

    // Quantidade NA granularidade informada (ex: 2 packs)
    #[validate(custom(function = "validate_positive"))]
    pub quantity: Decimal,

    // Quanto custou CADA unidade da granularidade (para o custo médio)
    #[validate(custom(function = "validate_not_negative"))]
    pub unit_cost: Decimal,

    pub unit_type: UnitType,

    pub note: Option<String>,
}

// Resposta: o produto com os custos recalculados + a linha de auditoria
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveStockResponse {
    pub product: Product,
    pub log: StockLog,
}

// POST /api/stock/receive
#[utoipa::path(
    post,
    path = "/api/stock/receive",
    tag = "Stock",
    request_body = ReceiveStockPayload,
    responses(
        (status = 200, description = "Custos recalculados e saldo somado", body = ReceiveStockResponse),
        (status = 403, description = "Apenas admin ou super admin"),
        (status = 404, description = "Produto fora do escopo ou inexistente"),
        (status = 409, description = "Produto desativado")
    ),
    security(("api_jwt" = []))
)]
pub async fn receive_stock(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequireRole<AdminOrAbove>,
    Json(payload): Json<ReceiveStockPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let caller = user.0.caller();
    let (product, log) = app_state
        .inventory_service
        .receive_stock(
            &caller,
            user.0.id,
            payload.product_id,
            payload.quantity,
            payload.unit_cost,
            payload.unit_type,
            payload.note.as_deref(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ReceiveStockResponse { product, log })))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StockLogQuery {
    pub product_id: Option<i32>,
}

// GET /api/stock/logs
#[utoipa::path(
    get,
    path = "/api/stock/logs",
    tag = "Stock",
    params(StockLogQuery),
    responses(
        (status = 200, description = "Auditoria de entradas do escopo do caller", body = Vec<StockLog>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_stock_logs(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<StockLogQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.0.caller();
    let logs = app_state
        .inventory_service
        .list_stock_logs(&caller, query.product_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(logs)))
}
