// src/handlers/customers.rs

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
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::parties::Customer,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub phone: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub address: Option<String>,
    pub store_id: Option<i32>,
}

// POST /api/customers
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "Parties",
    request_body = CustomerPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Customer)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<CustomerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let caller = user.0.caller();
    let store_id = caller
        .resolve_store(payload.store_id)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    // Handler simples: fala direto com o repositório
    let customer = app_state
        .party_repo
        .create_customer(
            &app_state.db_pool,
            store_id,
            &payload.name,
            payload.phone.as_deref(),
            payload.email.as_deref(),
            payload.address.as_deref(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(customer)))
}

// GET /api/customers
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "Parties",
    responses(
        (status = 200, description = "Clientes do escopo do caller", body = Vec<Customer>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.0.caller();
    let customers = app_state
        .party_repo
        .list_customers(&app_state.db_pool, &caller)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(customers)))
}

// PUT /api/customers/{id}
#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    tag = "Parties",
    params(("id" = i32, Path, description = "ID do cliente")),
    request_body = CustomerPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Customer),
        (status = 404, description = "Cliente fora do escopo ou inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<CustomerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let caller = user.0.caller();

    // Primeiro confere se o cliente está no escopo do caller
    let existing = app_state
        .party_repo
        .find_customer(&app_state.db_pool, &caller, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?
        .ok_or_else(|| {
            AppError::CustomerNotFound.to_api_error(&locale, &app_state.i18n_store)
        })?;

    let customer = app_state
        .party_repo
        .update_customer(
            &app_state.db_pool,
            existing.store_id,
            existing.id,
            &payload.name,
            payload.phone.as_deref(),
            payload.email.as_deref(),
            payload.address.as_deref(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(customer)))
}
