// src/handlers/products.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::validate_not_negative,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{AdminOrAbove, RequireRole},
    },
    models::catalog::{Category, Product},
};

// ---
// Payload: CreateProduct
// ---
// Só o preço POR PEÇA entra no cadastro: pack (3x) e dúzia (12x) são
// derivados pelo service, nunca informados pelo cliente.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O SKU é obrigatório."))]
    pub sku: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub description: Option<String>,
    pub category_id: Option<i32>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)] // Se o JSON não tiver esse campo, assume 0
    pub piece_buying_price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub piece_selling_price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub initial_quantity: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub min_quantity: Decimal,

    // Ignorado para quem não é super admin
    pub store_id: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, message = "O SKU é obrigatório."))]
    pub sku: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub description: Option<String>,
    pub category_id: Option<i32>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub piece_selling_price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub min_quantity: Decimal,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub category_id: Option<i32>,
    // Só produtos no alerta de estoque baixo
    #[serde(default)]
    pub low_stock: bool,
    #[serde(default)]
    pub include_inactive: bool,
}

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Catalog",
    params(ProductListQuery),
    responses(
        (status = 200, description = "Produtos do escopo do caller", body = Vec<Product>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.0.caller();
    let products = app_state
        .inventory_service
        .list_products(
            &caller,
            query.category_id,
            query.low_stock,
            query.include_inactive,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(products)))
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Catalog",
    params(("id" = i32, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto encontrado", body = Product),
        (status = 404, description = "Produto fora do escopo ou inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.0.caller();
    let product = app_state
        .inventory_service
        .get_product(&caller, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(product)))
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Catalog",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 409, description = "SKU já em uso na loja")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequireRole<AdminOrAbove>,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let caller = user.0.caller();
    let product = app_state
        .inventory_service
        .create_product(
            &caller,
            payload.store_id,
            payload.category_id,
            &payload.sku,
            &payload.name,
            payload.description.as_deref(),
            payload.piece_buying_price,
            payload.piece_selling_price,
            payload.initial_quantity,
            payload.min_quantity,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Catalog",
    params(("id" = i32, Path, description = "ID do produto")),
    request_body = UpdateProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto fora do escopo ou inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequireRole<AdminOrAbove>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let caller = user.0.caller();
    let product = app_state
        .inventory_service
        .update_product(
            &caller,
            id,
            payload.category_id,
            &payload.sku,
            &payload.name,
            payload.description.as_deref(),
            payload.piece_selling_price,
            payload.min_quantity,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(product)))
}

// POST /api/products/{id}/deactivate
// (Produto nunca é apagado: o histórico de vendas aponta para ele)
#[utoipa::path(
    post,
    path = "/api/products/{id}/deactivate",
    tag = "Catalog",
    params(("id" = i32, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto desativado", body = Product),
        (status = 404, description = "Produto fora do escopo ou inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn deactivate_product(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequireRole<AdminOrAbove>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.0.caller();
    let product = app_state
        .inventory_service
        .deactivate_product(&caller, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(product)))
}

// ---
// Categorias
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
    pub store_id: Option<i32>,
}

// POST /api/categories
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Catalog",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Category)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequireRole<AdminOrAbove>,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let caller = user.0.caller();
    let category = app_state
        .inventory_service
        .create_category(
            &caller,
            payload.store_id,
            &payload.name,
            payload.description.as_deref(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(category)))
}

// GET /api/categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Catalog",
    responses(
        (status = 200, description = "Categorias do escopo do caller", body = Vec<Category>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.0.caller();
    let categories = app_state
        .inventory_service
        .list_categories(&caller)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(categories)))
}
