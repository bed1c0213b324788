// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use serde_json::json;
use std::marker::PhantomData;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::auth::{Role, User},
};

/// 1. O Trait que define um requisito de cargo
pub trait RoleRequirement: Send + Sync + 'static {
    fn allows(role: Role) -> bool;
    fn label() -> &'static str;
}

/// 2. O Extractor (Guardião)
pub struct RequireRole<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleRequirement,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let locale = Locale::from_headers(&parts.headers);

        // A. Extrai o usuário que o auth_guard colocou na requisição
        let user = parts.extensions.get::<User>().ok_or(ApiError {
            status: StatusCode::UNAUTHORIZED,
            error: app_state.i18n_store.translate(&locale.0, "invalid_token"),
            details: None,
        })?;

        // B. Confere o cargo
        if !T::allows(user.role) {
            return Err(ApiError {
                status: StatusCode::FORBIDDEN,
                error: app_state.i18n_store.translate(&locale.0, "role_required"),
                details: Some(json!({ "required": T::label() })),
            });
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS REQUISITOS (TIPOS)
// ---

pub struct SuperAdminOnly;
impl RoleRequirement for SuperAdminOnly {
    fn allows(role: Role) -> bool {
        matches!(role, Role::SuperAdmin)
    }
    fn label() -> &'static str {
        "super_admin"
    }
}

pub struct AdminOrAbove;
impl RoleRequirement for AdminOrAbove {
    fn allows(role: Role) -> bool {
        role.rank() >= Role::Admin.rank()
    }
    fn label() -> &'static str {
        "admin"
    }
}

pub struct ManagerOrAbove;
impl RoleRequirement for ManagerOrAbove {
    fn allows(role: Role) -> bool {
        role.rank() >= Role::Manager.rank()
    }
    fn label() -> &'static str {
        "manager"
    }
}

// Qualquer funcionário da loja (exclui contas de cliente)
pub struct StaffOnly;
impl RoleRequirement for StaffOnly {
    fn allows(role: Role) -> bool {
        role.rank() >= Role::Sales.rank()
    }
    fn label() -> &'static str {
        "staff"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_gate_rejects_manager() {
        assert!(AdminOrAbove::allows(Role::SuperAdmin));
        assert!(AdminOrAbove::allows(Role::Admin));
        assert!(!AdminOrAbove::allows(Role::Manager));
        assert!(!AdminOrAbove::allows(Role::Sales));
    }

    #[test]
    fn staff_gate_rejects_clients() {
        assert!(StaffOnly::allows(Role::Sales));
        assert!(!StaffOnly::allows(Role::Client));
    }
}
