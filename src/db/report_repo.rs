// src/db/report_repo.rs

use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    common::scope::Caller,
    models::reports::{SalesChartEntry, SummaryReport, TopProductEntry},
};

// As agregações usam SQL montado com QueryBuilder porque o recorte de loja
// é condicional: super admin agrega todas as lojas, os demais só a própria
// (mesma regra do apply_store_scope, via Caller::scope_store_id).
#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn summary<'e, A>(&self, conn: A, caller: &Caller) -> Result<SummaryReport, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        // Transação para um snapshot consistente dos quatro números
        let mut tx = conn.begin().await?;
        let store = caller.scope_store_id();

        // A. Vendas de hoje (total e contagem)
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COALESCE(SUM(total_amount), 0), COUNT(*) FROM sales \
             WHERE status = 'COMPLETED' AND created_at::date = CURRENT_DATE",
        );
        if let Some(store_id) = store {
            qb.push(" AND store_id = ");
            qb.push_bind(store_id);
        }
        let (sales_today, sales_count_today): (Decimal, i64) =
            qb.build_query_as().fetch_one(&mut *tx).await?;

        // B. Despesas de hoje
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses WHERE incurred_on = CURRENT_DATE",
        );
        if let Some(store_id) = store {
            qb.push(" AND store_id = ");
            qb.push_bind(store_id);
        }
        let (expenses_today,): (Decimal,) = qb.build_query_as().fetch_one(&mut *tx).await?;

        // C. Produtos no alerta de estoque baixo
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM products WHERE is_active = TRUE AND quantity <= min_quantity",
        );
        if let Some(store_id) = store {
            qb.push(" AND store_id = ");
            qb.push_bind(store_id);
        }
        let (low_stock_count,): (i64,) = qb.build_query_as().fetch_one(&mut *tx).await?;

        // D. Valor do estoque a custo médio
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COALESCE(SUM(quantity * piece_buying_price), 0) FROM products \
             WHERE is_active = TRUE",
        );
        if let Some(store_id) = store {
            qb.push(" AND store_id = ");
            qb.push_bind(store_id);
        }
        let (inventory_value,): (Decimal,) = qb.build_query_as().fetch_one(&mut *tx).await?;

        tx.commit().await?;

        Ok(SummaryReport {
            sales_today,
            sales_count_today,
            expenses_today,
            low_stock_count,
            inventory_value,
        })
    }

    /// Total vendido por dia, últimos 30 dias.
    pub async fn sales_last_30_days<'e, E>(
        &self,
        executor: E,
        caller: &Caller,
    ) -> Result<Vec<SalesChartEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT to_char(created_at, 'YYYY-MM-DD') AS date, \
                    COALESCE(SUM(total_amount), 0) AS total \
             FROM sales \
             WHERE status = 'COMPLETED' \
               AND created_at >= (CURRENT_DATE - INTERVAL '30 days')",
        );
        if let Some(store_id) = caller.scope_store_id() {
            qb.push(" AND store_id = ");
            qb.push_bind(store_id);
        }
        qb.push(" GROUP BY 1 ORDER BY 1 ASC");

        let entries = qb
            .build_query_as::<SalesChartEntry>()
            .fetch_all(executor)
            .await?;
        Ok(entries)
    }

    /// Curva ABC: os 5 produtos com maior receita.
    pub async fn top_products<'e, E>(
        &self,
        executor: E,
        caller: &Caller,
    ) -> Result<Vec<TopProductEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT p.name AS product_name, \
                    SUM(si.quantity) AS total_quantity, \
                    SUM(si.subtotal) AS total_revenue \
             FROM sale_items si \
             JOIN sales s ON si.sale_id = s.id \
             JOIN products p ON si.product_id = p.id \
             WHERE s.status = 'COMPLETED'",
        );
        if let Some(store_id) = caller.scope_store_id() {
            qb.push(" AND s.store_id = ");
            qb.push_bind(store_id);
        }
        qb.push(" GROUP BY p.id, p.name ORDER BY total_revenue DESC LIMIT 5");

        let entries = qb
            .build_query_as::<TopProductEntry>()
            .fetch_all(executor)
            .await?;
        Ok(entries)
    }
}
