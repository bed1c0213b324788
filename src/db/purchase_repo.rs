// src/db/purchase_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    common::scope::{apply_store_scope, Caller, Filter, FilterValue},
    models::inventory::UnitType,
    models::purchasing::{PurchaseOrder, PurchaseOrderItem, PurchaseOrderStatus},
};

#[derive(Clone)]
pub struct PurchaseRepository {
    pool: PgPool,
}

impl PurchaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_order<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        supplier_id: i32,
        user_id: i32,
        expected_date: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> Result<PurchaseOrder, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, PurchaseOrder>(
            r#"
            INSERT INTO purchase_orders (store_id, supplier_id, user_id, expected_date, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(supplier_id)
        .bind(user_id)
        .bind(expected_date)
        .bind(notes)
        .fetch_one(executor)
        .await?;
        Ok(order)
    }

    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        purchase_order_id: i32,
        product_id: i32,
        quantity: Decimal,
        unit_type: UnitType,
        unit_cost: Decimal,
    ) -> Result<PurchaseOrderItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, PurchaseOrderItem>(
            r#"
            INSERT INTO purchase_order_items (
                store_id, purchase_order_id, product_id, quantity, unit_type, unit_cost
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(purchase_order_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_type)
        .bind(unit_cost)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        caller: &Caller,
        status: Option<PurchaseOrderStatus>,
    ) -> Result<Vec<PurchaseOrder>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filter = apply_store_scope(Some(caller), Filter::new());

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM purchase_orders");
        let written = filter.push_where(&mut qb);
        if let Some(status) = status {
            qb.push(if written > 0 { " AND " } else { " WHERE " });
            qb.push("status = ");
            qb.push_bind(status);
        }
        qb.push(" ORDER BY created_at DESC");

        let orders = qb
            .build_query_as::<PurchaseOrder>()
            .fetch_all(executor)
            .await?;
        Ok(orders)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        caller: &Caller,
        id: i32,
    ) -> Result<Option<PurchaseOrder>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filter = apply_store_scope(
            Some(caller),
            Filter::new().with("id", FilterValue::Int(id)),
        );

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM purchase_orders");
        filter.push_where(&mut qb);

        let order = qb
            .build_query_as::<PurchaseOrder>()
            .fetch_optional(executor)
            .await?;
        Ok(order)
    }

    pub async fn list_items<'e, E>(
        &self,
        executor: E,
        purchase_order_id: i32,
    ) -> Result<Vec<PurchaseOrderItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, PurchaseOrderItem>(
            "SELECT * FROM purchase_order_items WHERE purchase_order_id = $1 ORDER BY id",
        )
        .bind(purchase_order_id)
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    /// Marca o pedido como recebido e registra o momento da entrada.
    pub async fn mark_received<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        id: i32,
    ) -> Result<PurchaseOrder, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, PurchaseOrder>(
            r#"
            UPDATE purchase_orders
            SET status = $1, received_at = NOW(), updated_at = NOW()
            WHERE id = $2 AND store_id = $3
            RETURNING *
            "#,
        )
        .bind(PurchaseOrderStatus::Received)
        .bind(id)
        .bind(store_id)
        .fetch_one(executor)
        .await?;
        Ok(order)
    }

    pub async fn mark_cancelled<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        id: i32,
    ) -> Result<PurchaseOrder, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, PurchaseOrder>(
            r#"
            UPDATE purchase_orders
            SET status = $1, updated_at = NOW()
            WHERE id = $2 AND store_id = $3
            RETURNING *
            "#,
        )
        .bind(PurchaseOrderStatus::Cancelled)
        .bind(id)
        .bind(store_id)
        .fetch_one(executor)
        .await?;
        Ok(order)
    }

    pub async fn supplier_name<'e, E>(
        &self,
        executor: E,
        supplier_id: i32,
    ) -> Result<String, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM suppliers WHERE id = $1")
            .bind(supplier_id)
            .fetch_one(executor)
            .await?;
        Ok(name)
    }
}
