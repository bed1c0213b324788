// src/handlers/suppliers.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{ManagerOrAbove, RequireRole},
    },
    models::parties::Supplier,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub address: Option<String>,
    pub store_id: Option<i32>,
}

// POST /api/suppliers
#[utoipa::path(
    post,
    path = "/api/suppliers",
    tag = "Parties",
    request_body = SupplierPayload,
    responses(
        (status = 201, description = "Fornecedor criado", body = Supplier)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequireRole<ManagerOrAbove>,
    Json(payload): Json<SupplierPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let caller = user.0.caller();
    let store_id = caller
        .resolve_store(payload.store_id)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let supplier = app_state
        .party_repo
        .create_supplier(
            &app_state.db_pool,
            store_id,
            &payload.name,
            payload.company.as_deref(),
            payload.phone.as_deref(),
            payload.email.as_deref(),
            payload.address.as_deref(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(supplier)))
}

// GET /api/suppliers
#[utoipa::path(
    get,
    path = "/api/suppliers",
    tag = "Parties",
    responses(
        (status = 200, description = "Fornecedores do escopo do caller", body = Vec<Supplier>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.0.caller();
    let suppliers = app_state
        .party_repo
        .list_suppliers(&app_state.db_pool, &caller)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(suppliers)))
}

// PUT /api/suppliers/{id}
#[utoipa::path(
    put,
    path = "/api/suppliers/{id}",
    tag = "Parties",
    params(("id" = i32, Path, description = "ID do fornecedor")),
    request_body = SupplierPayload,
    responses(
        (status = 200, description = "Fornecedor atualizado", body = Supplier),
        (status = 404, description = "Fornecedor fora do escopo ou inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _guard: RequireRole<ManagerOrAbove>,
    Path(id): Path<i32>,
    Json(payload): Json<SupplierPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let caller = user.0.caller();

    let existing = app_state
        .party_repo
        .find_supplier(&app_state.db_pool, &caller, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?
        .ok_or_else(|| {
            AppError::SupplierNotFound.to_api_error(&locale, &app_state.i18n_store)
        })?;

    let supplier = app_state
        .party_repo
        .update_supplier(
            &app_state.db_pool,
            existing.store_id,
            existing.id,
            &payload.name,
            payload.company.as_deref(),
            payload.phone.as_deref(),
            payload.email.as_deref(),
            payload.address.as_deref(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(supplier)))
}
