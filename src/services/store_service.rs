// src/services/store_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{StoreRepository, UserRepository},
    models::auth::Role,
    models::store::{Store, StoreWithAdmin},
    services::auth_service::AuthService,
};

#[derive(Clone)]
pub struct StoreService {
    store_repo: StoreRepository,
    user_repo: UserRepository,
    auth_service: AuthService,
    pool: PgPool,
}

impl StoreService {
    pub fn new(
        store_repo: StoreRepository,
        user_repo: UserRepository,
        auth_service: AuthService,
        pool: PgPool,
    ) -> Self {
        Self {
            store_repo,
            user_repo,
            auth_service,
            pool,
        }
    }

    /// LÓGICA DE NEGÓCIO: cria a loja e, atomicamente, o seu primeiro
    /// usuário ADMIN. Loja sem admin é loja inacessível.
    pub async fn create_store_with_admin(
        &self,
        name: &str,
        subdomain: &str,
        admin_name: &str,
        admin_email: &str,
        admin_password: &str,
    ) -> Result<StoreWithAdmin, AppError> {
        // O hashing fica fora da transação (não toca no banco)
        let password_hash = self.auth_service.hash_password(admin_password).await?;

        // 1. Inicia a transação
        let mut tx = self.pool.begin().await?;

        // 2. Cria a loja
        let store = self
            .store_repo
            .create_store(&mut *tx, name, subdomain)
            .await?;

        // 3. Cria o admin já vinculado a ela
        // Se falhar aqui (ex: e-mail duplicado), a loja criada acima é desfeita
        let admin = self
            .user_repo
            .create_user(
                &mut *tx,
                Some(store.id),
                admin_name,
                admin_email,
                &password_hash,
                Role::Admin,
            )
            .await?;

        // 4. Commit
        tx.commit().await?;

        Ok(StoreWithAdmin { store, admin })
    }

    pub async fn list_stores(&self) -> Result<Vec<Store>, AppError> {
        self.store_repo.list_all(&self.pool).await
    }
}
