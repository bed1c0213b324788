// src/handlers/sales.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::{validate_not_negative, validate_positive},
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{AdminOrAbove, RequireRole, StaffOnly},
    },
    models::inventory::UnitType,
    models::sales::{PaymentMethod, Sale, SaleDetail},
    services::sales_service::{SaleItemInput, SalePaymentInput},
};

// ---
// Payload: CreateSale (itens + pagamento dividido)
// ---
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemPayload {
    pub product_id: i32,

    #[validate(custom(function = "validate_positive"))]
    pub quantity: Decimal,

    pub unit_type: UnitType,

    // None = usa o preço de venda cadastrado para a granularidade
    #[validate(custom(function = "validate_not_negative"))]
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalePaymentPayload {
    pub method: PaymentMethod,

    #[validate(custom(function = "validate_not_negative"))]
    pub amount: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    pub customer_id: Option<i32>,

    #[validate(length(min = 1, message = "A venda precisa de pelo menos um item."), nested)]
    pub items: Vec<SaleItemPayload>,

    // A soma precisa bater com total - desconto
    #[validate(length(min = 1, message = "A venda precisa de pelo menos um pagamento."), nested)]
    pub payments: Vec<SalePaymentPayload>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub discount: Decimal,

    pub store_id: Option<i32>,
}

// POST /api/sales
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Sales",
    request_body = CreateSalePayload,
    responses(
        (status = 201, description = "Venda registrada com baixa de estoque", body = SaleDetail),
        (status = 400, description = "Pagamentos não fecham com o total"),
        (status = 409, description = "Estoque insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequireRole<StaffOnly>,
    Json(payload): Json<CreateSalePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let items: Vec<SaleItemInput> = payload
        .items
        .iter()
        .map(|item| SaleItemInput {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_type: item.unit_type,
            unit_price: item.unit_price,
        })
        .collect();

    let payments: Vec<SalePaymentInput> = payload
        .payments
        .iter()
        .map(|payment| SalePaymentInput {
            method: payment.method,
            amount: payment.amount,
        })
        .collect();

    let caller = user.0.caller();
    let sale = app_state
        .sales_service
        .create_sale(
            &caller,
            user.0.id,
            payload.store_id,
            payload.customer_id,
            &items,
            &payments,
            payload.discount,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(sale)))
}

// GET /api/sales
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Sales",
    responses(
        (status = 200, description = "Vendas do escopo do caller", body = Vec<Sale>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.0.caller();
    let sales = app_state
        .sales_service
        .list_sales(&caller)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(sales)))
}

// GET /api/sales/{id}
#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    tag = "Sales",
    params(("id" = i32, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda com itens e pagamentos", body = SaleDetail),
        (status = 404, description = "Venda fora do escopo ou inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.0.caller();
    let sale = app_state
        .sales_service
        .get_sale(&caller, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(sale)))
}

// POST /api/sales/{id}/void
#[utoipa::path(
    post,
    path = "/api/sales/{id}/void",
    tag = "Sales",
    params(("id" = i32, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda estornada, estoque devolvido", body = Sale),
        (status = 409, description = "Venda já estornada")
    ),
    security(("api_jwt" = []))
)]
pub async fn void_sale(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequireRole<AdminOrAbove>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.0.caller();
    let sale = app_state
        .sales_service
        .void_sale(&caller, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(sale)))
}
