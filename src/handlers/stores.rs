// src/handlers/stores.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{RequireRole, SuperAdminOnly},
    },
    models::store::{Store, StoreWithAdmin},
};

// ---
// Payload: CreateStore (loja + primeiro admin, numa tacada só)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStorePayload {
    #[validate(length(min = 1, message = "O nome da loja é obrigatório."))]
    pub name: String,

    // Identificador público da loja (ex: central.pdv.app)
    #[validate(length(min = 2, message = "O subdomínio deve ter no mínimo 2 caracteres."))]
    pub subdomain: String,

    #[validate(length(min = 1, message = "O nome do admin é obrigatório."))]
    pub admin_name: String,

    #[validate(email(message = "O e-mail do admin é inválido."))]
    pub admin_email: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub admin_password: String,
}

// POST /api/stores
#[utoipa::path(
    post,
    path = "/api/stores",
    tag = "Stores",
    request_body = CreateStorePayload,
    responses(
        (status = 201, description = "Loja e admin criados atomicamente", body = StoreWithAdmin),
        (status = 403, description = "Apenas super admin"),
        (status = 409, description = "Subdomínio ou e-mail já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_store(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    _guard: RequireRole<SuperAdminOnly>,
    Json(payload): Json<CreateStorePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let created = app_state
        .store_service
        .create_store_with_admin(
            &payload.name,
            &payload.subdomain,
            &payload.admin_name,
            &payload.admin_email,
            &payload.admin_password,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(created)))
}

// GET /api/stores
#[utoipa::path(
    get,
    path = "/api/stores",
    tag = "Stores",
    responses(
        (status = 200, description = "Todas as lojas do sistema", body = Vec<Store>),
        (status = 403, description = "Apenas super admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_stores(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    _guard: RequireRole<SuperAdminOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let stores = app_state
        .store_service
        .list_stores()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(stores)))
}
