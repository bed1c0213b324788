// src/db/store_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::store::Store};

#[derive(Clone)]
pub struct StoreRepository {
    pool: PgPool,
}

impl StoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Cria uma nova loja. O subdomínio é único no sistema inteiro.
    pub async fn create_store<'e, E>(
        &self,
        executor: E,
        name: &str,
        subdomain: &str,
    ) -> Result<Store, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Store>(
            r#"
            INSERT INTO stores (name, subdomain)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(subdomain)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::SubdomainAlreadyExists(subdomain.to_string());
                }
            }
            e.into()
        })
    }

    // Só o super admin chega aqui, então não há escopo a aplicar
    pub async fn list_all<'e, E>(&self, executor: E) -> Result<Vec<Store>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let stores = sqlx::query_as::<_, Store>("SELECT * FROM stores ORDER BY name ASC")
            .fetch_all(executor)
            .await?;
        Ok(stores)
    }
}
