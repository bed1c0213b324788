// src/db/stock_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    common::scope::{apply_store_scope, Caller, Filter, FilterValue},
    models::inventory::{StockLog, UnitType},
};

#[derive(Clone)]
pub struct StockRepository {
    pool: PgPool,
}

impl StockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Grava a linha de auditoria de um recebimento (antes/depois do custo).
    #[allow(clippy::too_many_arguments)]
    pub async fn record_receipt<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        product_id: i32,
        user_id: i32,
        quantity: Decimal,
        unit_type: UnitType,
        unit_cost: Decimal,
        previous_piece_cost: Decimal,
        new_piece_cost: Decimal,
        note: Option<&str>,
    ) -> Result<StockLog, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let log = sqlx::query_as::<_, StockLog>(
            r#"
            INSERT INTO stock_logs (
                store_id, product_id, user_id, quantity, unit_type,
                unit_cost, previous_piece_cost, new_piece_cost, note
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(product_id)
        .bind(user_id)
        .bind(quantity)
        .bind(unit_type)
        .bind(unit_cost)
        .bind(previous_piece_cost)
        .bind(new_piece_cost)
        .bind(note)
        .fetch_one(executor)
        .await?;
        Ok(log)
    }

    pub async fn list_logs<'e, E>(
        &self,
        executor: E,
        caller: &Caller,
        product_id: Option<i32>,
    ) -> Result<Vec<StockLog>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut filter = Filter::new();
        if let Some(product) = product_id {
            filter.set("product_id", FilterValue::Int(product));
        }
        let filter = apply_store_scope(Some(caller), filter);

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM stock_logs");
        filter.push_where(&mut qb);
        qb.push(" ORDER BY created_at DESC");

        let logs = qb.build_query_as::<StockLog>().fetch_all(executor).await?;
        Ok(logs)
    }
}
