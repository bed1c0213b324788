// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::auth::User,
};

// O middleware em si: valida o Bearer token e injeta o usuário na requisição
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // O guard roda antes dos extratores, então o idioma sai direto dos headers
    let locale = Locale::from_headers(request.headers());

    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    if let Some(auth_header) = auth_header {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            let user = app_state
                .auth_service
                .validate_token(token)
                .await
                .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

            // Insere o usuário nos "extensions" da requisição
            request.extensions_mut().insert(user);
            return Ok(next.run(request).await);
        }
    }

    Err(ApiError {
        status: StatusCode::UNAUTHORIZED,
        error: app_state.i18n_store.translate(&locale.0, "invalid_token"),
        details: None,
    })
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Se não houver usuário aqui, o auth_guard não foi aplicado na rota.
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(ApiError {
                status: StatusCode::UNAUTHORIZED,
                error: "Authentication required.".to_string(),
                details: None,
            })
    }
}
