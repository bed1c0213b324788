// src/services/auth_service.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    common::scope::Caller,
    db::UserRepository,
    models::auth::{Claims, Role, User},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, pool: PgPool) -> Self {
        Self {
            user_repo,
            jwt_secret,
            pool,
        }
    }

    /// Hashing de senha fora do executor async (bcrypt é CPU-bound).
    pub async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        // Conta desativada não loga, mesmo com a senha certa
        if !user.is_active {
            return Err(AppError::InvalidCredentials);
        }

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(user.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let user = self
            .user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !user.is_active {
            return Err(AppError::InvalidToken);
        }

        Ok(user)
    }

    /// Cria um usuário respeitando a hierarquia de cargos:
    /// - SUPER_ADMIN só é criado por outro SUPER_ADMIN (e fica sem loja);
    /// - os demais callers só criam cargos ABAIXO do seu, na própria loja.
    pub async fn create_user(
        &self,
        caller: &Caller,
        requested_store: Option<i32>,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<User, AppError> {
        if role == Role::SuperAdmin && !caller.role.is_privileged() {
            return Err(AppError::Forbidden);
        }
        if !caller.role.is_privileged() && role.rank() >= caller.role.rank() {
            return Err(AppError::Forbidden);
        }

        let store_id = if role == Role::SuperAdmin {
            None
        } else {
            Some(caller.resolve_store(requested_store)?)
        };

        let password_hash = self.hash_password(password).await?;

        self.user_repo
            .create_user(&self.pool, store_id, name, email, &password_hash, role)
            .await
    }

    pub async fn list_users(&self, caller: &Caller) -> Result<Vec<User>, AppError> {
        self.user_repo.list(&self.pool, caller).await
    }

    fn create_token(&self, user_id: i32) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        // Usa '?' para um tratamento de erro mais limpo
        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
