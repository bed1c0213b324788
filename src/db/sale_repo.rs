// src/db/sale_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::scope::{apply_store_scope, Caller, Filter, FilterValue},
    models::inventory::UnitType,
    models::sales::{PaymentMethod, Sale, SaleItem, SalePayment, SaleStatus},
};

#[derive(Clone)]
pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_sale<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        user_id: i32,
        customer_id: Option<i32>,
        reference: Uuid,
        total_amount: Decimal,
        discount: Decimal,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (store_id, user_id, customer_id, reference, total_amount, discount)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(user_id)
        .bind(customer_id)
        .bind(reference)
        .bind(total_amount)
        .bind(discount)
        .fetch_one(executor)
        .await?;
        Ok(sale)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        sale_id: i32,
        product_id: i32,
        quantity: Decimal,
        unit_type: UnitType,
        unit_price: Decimal,
        subtotal: Decimal,
    ) -> Result<SaleItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, SaleItem>(
            r#"
            INSERT INTO sale_items (
                store_id, sale_id, product_id, quantity, unit_type, unit_price, subtotal
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(sale_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_type)
        .bind(unit_price)
        .bind(subtotal)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }

    pub async fn insert_payment<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        sale_id: i32,
        method: PaymentMethod,
        amount: Decimal,
    ) -> Result<SalePayment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment = sqlx::query_as::<_, SalePayment>(
            r#"
            INSERT INTO sale_payments (store_id, sale_id, method, amount)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(sale_id)
        .bind(method)
        .bind(amount)
        .fetch_one(executor)
        .await?;
        Ok(payment)
    }

    pub async fn list<'e, E>(&self, executor: E, caller: &Caller) -> Result<Vec<Sale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filter = apply_store_scope(Some(caller), Filter::new());

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM sales");
        filter.push_where(&mut qb);
        qb.push(" ORDER BY created_at DESC");

        let sales = qb.build_query_as::<Sale>().fetch_all(executor).await?;
        Ok(sales)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        caller: &Caller,
        id: i32,
    ) -> Result<Option<Sale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filter = apply_store_scope(
            Some(caller),
            Filter::new().with("id", FilterValue::Int(id)),
        );

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM sales");
        filter.push_where(&mut qb);

        let sale = qb.build_query_as::<Sale>().fetch_optional(executor).await?;
        Ok(sale)
    }

    pub async fn list_items<'e, E>(
        &self,
        executor: E,
        sale_id: i32,
    ) -> Result<Vec<SaleItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items =
            sqlx::query_as::<_, SaleItem>("SELECT * FROM sale_items WHERE sale_id = $1 ORDER BY id")
                .bind(sale_id)
                .fetch_all(executor)
                .await?;
        Ok(items)
    }

    pub async fn list_payments<'e, E>(
        &self,
        executor: E,
        sale_id: i32,
    ) -> Result<Vec<SalePayment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payments = sqlx::query_as::<_, SalePayment>(
            "SELECT * FROM sale_payments WHERE sale_id = $1 ORDER BY id",
        )
        .bind(sale_id)
        .fetch_all(executor)
        .await?;
        Ok(payments)
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        id: i32,
        status: SaleStatus,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales
            SET status = $1
            WHERE id = $2 AND store_id = $3
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(id)
        .bind(store_id)
        .fetch_one(executor)
        .await?;
        Ok(sale)
    }

    // Nomes para a tela de detalhe (cliente é opcional, caixa sempre existe)
    pub async fn customer_name<'e, E>(
        &self,
        executor: E,
        customer_id: i32,
    ) -> Result<Option<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM customers WHERE id = $1")
            .bind(customer_id)
            .fetch_optional(executor)
            .await?;
        Ok(name)
    }

    pub async fn cashier_name<'e, E>(&self, executor: E, user_id: i32) -> Result<String, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(executor)
            .await?;
        Ok(name)
    }
}
