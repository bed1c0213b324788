// src/db/product_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    common::scope::{apply_store_scope, Caller, Filter, FilterValue},
    models::catalog::{Category, Product},
    services::pricing::UnitPrices,
};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Categorias
    // ---

    pub async fn create_category<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (store_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(name)
        .bind(description)
        .fetch_one(executor)
        .await?;
        Ok(category)
    }

    pub async fn list_categories<'e, E>(
        &self,
        executor: E,
        caller: &Caller,
    ) -> Result<Vec<Category>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filter = apply_store_scope(Some(caller), Filter::new());

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM categories");
        filter.push_where(&mut qb);
        qb.push(" ORDER BY name ASC");

        let categories = qb.build_query_as::<Category>().fetch_all(executor).await?;
        Ok(categories)
    }

    pub async fn find_category<'e, E>(
        &self,
        executor: E,
        caller: &Caller,
        id: i32,
    ) -> Result<Option<Category>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filter = apply_store_scope(
            Some(caller),
            Filter::new().with("id", FilterValue::Int(id)),
        );

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM categories");
        filter.push_where(&mut qb);

        let category = qb
            .build_query_as::<Category>()
            .fetch_optional(executor)
            .await?;
        Ok(category)
    }

    // ---
    // Produtos
    // ---

    /// Lista os produtos visíveis para o caller, com filtros opcionais.
    pub async fn list<'e, E>(
        &self,
        executor: E,
        caller: &Caller,
        category_id: Option<i32>,
        low_stock: bool,
        include_inactive: bool,
    ) -> Result<Vec<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut filter = Filter::new();
        if let Some(category) = category_id {
            filter.set("category_id", FilterValue::Int(category));
        }
        if !include_inactive {
            filter.set("is_active", FilterValue::Bool(true));
        }
        let filter = apply_store_scope(Some(caller), filter);

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM products");
        let written = filter.push_where(&mut qb);
        if low_stock {
            qb.push(if written > 0 { " AND " } else { " WHERE " });
            qb.push("quantity <= min_quantity");
        }
        qb.push(" ORDER BY name ASC");

        let products = qb.build_query_as::<Product>().fetch_all(executor).await?;
        Ok(products)
    }

    /// Busca um produto pelo id, respeitando o escopo do caller.
    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        caller: Option<&Caller>,
        id: i32,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filter = apply_store_scope(caller, Filter::new().with("id", FilterValue::Int(id)));

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM products");
        filter.push_where(&mut qb);

        let product = qb
            .build_query_as::<Product>()
            .fetch_optional(executor)
            .await?;
        Ok(product)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        category_id: Option<i32>,
        sku: &str,
        name: &str,
        description: Option<&str>,
        buying: &UnitPrices,
        selling: &UnitPrices,
        quantity: Decimal,
        min_quantity: Decimal,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (
                store_id, category_id, sku, name, description,
                piece_buying_price, pack_buying_price, dozen_buying_price,
                piece_selling_price, pack_selling_price, dozen_selling_price,
                quantity, min_quantity
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(category_id)
        .bind(sku)
        .bind(name)
        .bind(description)
        .bind(buying.piece)
        .bind(buying.pack)
        .bind(buying.dozen)
        .bind(selling.piece)
        .bind(selling.pack)
        .bind(selling.dozen)
        .bind(quantity)
        .bind(min_quantity)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::SkuAlreadyExists(sku.to_string());
                }
            }
            e.into()
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_info<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        id: i32,
        category_id: Option<i32>,
        sku: &str,
        name: &str,
        description: Option<&str>,
        selling: &UnitPrices,
        min_quantity: Decimal,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET category_id = $1,
                sku = $2,
                name = $3,
                description = $4,
                piece_selling_price = $5,
                pack_selling_price = $6,
                dozen_selling_price = $7,
                min_quantity = $8,
                updated_at = NOW()
            WHERE id = $9 AND store_id = $10
            RETURNING *
            "#,
        )
        .bind(category_id)
        .bind(sku)
        .bind(name)
        .bind(description)
        .bind(selling.piece)
        .bind(selling.pack)
        .bind(selling.dozen)
        .bind(min_quantity)
        .bind(id)
        .bind(store_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::SkuAlreadyExists(sku.to_string());
                }
            }
            e.into()
        })
    }

    // Produto nunca é apagado, só desativado (o histórico de vendas aponta pra ele)
    pub async fn deactivate<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        id: i32,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1 AND store_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(store_id)
        .fetch_one(executor)
        .await?;
        Ok(product)
    }

    /// Grava o resultado de um recebimento: os três custos recalculados
    /// e o incremento do saldo (em peças), numa única query.
    pub async fn apply_stock_receipt<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        id: i32,
        buying: &UnitPrices,
        pieces_added: Decimal,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET piece_buying_price = $1,
                pack_buying_price = $2,
                dozen_buying_price = $3,
                quantity = quantity + $4,
                updated_at = NOW()
            WHERE id = $5 AND store_id = $6
            RETURNING *
            "#,
        )
        .bind(buying.piece)
        .bind(buying.pack)
        .bind(buying.dozen)
        .bind(pieces_added)
        .bind(id)
        .bind(store_id)
        .fetch_one(executor)
        .await?;
        Ok(product)
    }

    /// Soma `delta` (positivo ou negativo) ao saldo em peças.
    /// A checagem de saldo suficiente acontece no service, antes daqui.
    pub async fn adjust_quantity<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        id: i32,
        delta: Decimal,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET quantity = quantity + $1, updated_at = NOW()
            WHERE id = $2 AND store_id = $3
            RETURNING *
            "#,
        )
        .bind(delta)
        .bind(id)
        .bind(store_id)
        .fetch_one(executor)
        .await?;
        Ok(product)
    }
}
