// src/handlers/purchase_orders.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
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
    models::inventory::UnitType,
    models::purchasing::{PurchaseOrder, PurchaseOrderDetail, PurchaseOrderStatus},
    services::purchasing_service::PurchaseItemInput,
};

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItemPayload {
    pub product_id: i32,

    #[validate(custom(function = "validate_positive"))]
    pub quantity: Decimal,

    pub unit_type: UnitType,

    #[validate(custom(function = "validate_not_negative"))]
    pub unit_cost: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseOrderPayload {
    pub supplier_id: i32,

    #[schema(value_type = String, format = Date, example = "2026-09-01")]
    pub expected_date: Option<NaiveDate>,

    pub notes: Option<String>,

    #[validate(length(min = 1, message = "O pedido precisa de pelo menos um item."), nested)]
    pub items: Vec<PurchaseItemPayload>,

    pub store_id: Option<i32>,
}

// POST /api/purchase-orders
#[utoipa::path(
    post,
    path = "/api/purchase-orders",
    tag = "Purchasing",
    request_body = CreatePurchaseOrderPayload,
    responses(
        (status = 201, description = "Pedido de compra criado (pendente)", body = PurchaseOrderDetail),
        (status = 404, description = "Fornecedor ou produto fora do escopo")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_purchase_order(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequireRole<AdminOrAbove>,
    Json(payload): Json<CreatePurchaseOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let items: Vec<PurchaseItemInput> = payload
        .items
        .iter()
        .map(|item| PurchaseItemInput {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_type: item.unit_type,
            unit_cost: item.unit_cost,
        })
        .collect();

    let caller = user.0.caller();
    let order = app_state
        .purchasing_service
        .create_order(
            &caller,
            user.0.id,
            payload.store_id,
            payload.supplier_id,
            payload.expected_date,
            payload.notes.as_deref(),
            &items,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(order)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderListQuery {
    pub status: Option<PurchaseOrderStatus>,
}

// GET /api/purchase-orders
#[utoipa::path(
    get,
    path = "/api/purchase-orders",
    tag = "Purchasing",
    params(PurchaseOrderListQuery),
    responses(
        (status = 200, description = "Pedidos do escopo do caller", body = Vec<PurchaseOrder>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_purchase_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<PurchaseOrderListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.0.caller();
    let orders = app_state
        .purchasing_service
        .list_orders(&caller, query.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(orders)))
}

// GET /api/purchase-orders/{id}
#[utoipa::path(
    get,
    path = "/api/purchase-orders/{id}",
    tag = "Purchasing",
    params(("id" = i32, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido com itens", body = PurchaseOrderDetail),
        (status = 404, description = "Pedido fora do escopo ou inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_purchase_order(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.0.caller();
    let order = app_state
        .purchasing_service
        .get_order(&caller, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(order)))
}

// POST /api/purchase-orders/{id}/receive
// Dispara a média ponderada para cada item do pedido
#[utoipa::path(
    post,
    path = "/api/purchase-orders/{id}/receive",
    tag = "Purchasing",
    params(("id" = i32, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Estoque recebido, pedido concluído", body = PurchaseOrderDetail),
        (status = 409, description = "Pedido não está pendente")
    ),
    security(("api_jwt" = []))
)]
pub async fn receive_purchase_order(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequireRole<AdminOrAbove>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.0.caller();
    let order = app_state
        .purchasing_service
        .receive_order(&caller, user.0.id, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(order)))
}

// POST /api/purchase-orders/{id}/cancel
#[utoipa::path(
    post,
    path = "/api/purchase-orders/{id}/cancel",
    tag = "Purchasing",
    params(("id" = i32, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido cancelado", body = PurchaseOrder),
        (status = 409, description = "Pedido não está pendente")
    ),
    security(("api_jwt" = []))
)]
pub async fn cancel_purchase_order(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequireRole<AdminOrAbove>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.0.caller();
    let order = app_state
        .purchasing_service
        .cancel_order(&caller, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(order)))
}
