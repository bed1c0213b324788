// src/db/expense_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    common::scope::{apply_store_scope, Caller, Filter},
    models::finance::Expense,
};

#[derive(Clone)]
pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        user_id: i32,
        category: Option<&str>,
        description: &str,
        amount: Decimal,
        incurred_on: NaiveDate,
    ) -> Result<Expense, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (store_id, user_id, category, description, amount, incurred_on)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(user_id)
        .bind(category)
        .bind(description)
        .bind(amount)
        .bind(incurred_on)
        .fetch_one(executor)
        .await?;
        Ok(expense)
    }

    /// Lista as despesas do escopo do caller, com recorte de datas opcional.
    pub async fn list<'e, E>(
        &self,
        executor: E,
        caller: &Caller,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Expense>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filter = apply_store_scope(Some(caller), Filter::new());

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM expenses");
        let written = filter.push_where(&mut qb);
        let mut separator = if written > 0 { " AND " } else { " WHERE " };

        if let Some(from) = from {
            qb.push(separator);
            qb.push("incurred_on >= ");
            qb.push_bind(from);
            separator = " AND ";
        }
        if let Some(to) = to {
            qb.push(separator);
            qb.push("incurred_on <= ");
            qb.push_bind(to);
        }
        qb.push(" ORDER BY incurred_on DESC, id DESC");

        let expenses = qb.build_query_as::<Expense>().fetch_all(executor).await?;
        Ok(expenses)
    }
}
