// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::scope::Caller;

// ---
// Cargo do usuário
// ---
// Enum taggeado em vez de comparação de strings: o compilador garante que
// nenhum cargo fica de fora de um match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    Manager,
    Sales,
    Client,
}

impl Role {
    /// Só o super admin enxerga todas as lojas.
    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    /// Hierarquia para regras do tipo "só cria cargos abaixo do seu".
    pub fn rank(&self) -> u8 {
        match self {
            Role::SuperAdmin => 4,
            Role::Admin => 3,
            Role::Manager => 2,
            Role::Sales => 1,
            Role::Client => 0,
        }
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,

    // NULL apenas para super admins
    pub store_id: Option<i32>,

    pub name: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// O contexto de escopo usado por todos os caminhos de consulta.
    pub fn caller(&self) -> Caller {
        Caller {
            role: self.role,
            store_id: self.store_id,
        }
    }
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,   // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_super_admin_is_privileged() {
        assert!(Role::SuperAdmin.is_privileged());
        for role in [Role::Admin, Role::Manager, Role::Sales, Role::Client] {
            assert!(!role.is_privileged());
        }
    }

    #[test]
    fn rank_is_strictly_decreasing() {
        let ladder = [
            Role::SuperAdmin,
            Role::Admin,
            Role::Manager,
            Role::Sales,
            Role::Client,
        ];
        for pair in ladder.windows(2) {
            assert!(pair[0].rank() > pair[1].rank());
        }
    }
}
