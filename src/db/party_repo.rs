// src/db/party_repo.rs

use sqlx::{Executor, PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    common::scope::{apply_store_scope, Caller, Filter, FilterValue},
    models::parties::{Customer, Supplier},
};

// Clientes e fornecedores compartilham o mesmo formato de acesso,
// então vivem no mesmo repositório.
#[derive(Clone)]
pub struct PartyRepository {
    pool: PgPool,
}

impl PartyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Clientes
    // ---

    pub async fn create_customer<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        name: &str,
        phone: Option<&str>,
        email: Option<&str>,
        address: Option<&str>,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (store_id, name, phone, email, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(name)
        .bind(phone)
        .bind(email)
        .bind(address)
        .fetch_one(executor)
        .await?;
        Ok(customer)
    }

    pub async fn list_customers<'e, E>(
        &self,
        executor: E,
        caller: &Caller,
    ) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filter = apply_store_scope(Some(caller), Filter::new());

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM customers");
        filter.push_where(&mut qb);
        qb.push(" ORDER BY name ASC");

        let customers = qb.build_query_as::<Customer>().fetch_all(executor).await?;
        Ok(customers)
    }

    pub async fn find_customer<'e, E>(
        &self,
        executor: E,
        caller: &Caller,
        id: i32,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filter = apply_store_scope(
            Some(caller),
            Filter::new().with("id", FilterValue::Int(id)),
        );

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM customers");
        filter.push_where(&mut qb);

        let customer = qb
            .build_query_as::<Customer>()
            .fetch_optional(executor)
            .await?;
        Ok(customer)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_customer<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        id: i32,
        name: &str,
        phone: Option<&str>,
        email: Option<&str>,
        address: Option<&str>,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET name = $1, phone = $2, email = $3, address = $4, updated_at = NOW()
            WHERE id = $5 AND store_id = $6
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(email)
        .bind(address)
        .bind(id)
        .bind(store_id)
        .fetch_one(executor)
        .await?;
        Ok(customer)
    }

    // ---
    // Fornecedores
    // ---

    #[allow(clippy::too_many_arguments)]
    pub async fn create_supplier<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        name: &str,
        company: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
        address: Option<&str>,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (store_id, name, company, phone, email, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(name)
        .bind(company)
        .bind(phone)
        .bind(email)
        .bind(address)
        .fetch_one(executor)
        .await?;
        Ok(supplier)
    }

    pub async fn list_suppliers<'e, E>(
        &self,
        executor: E,
        caller: &Caller,
    ) -> Result<Vec<Supplier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filter = apply_store_scope(Some(caller), Filter::new());

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM suppliers");
        filter.push_where(&mut qb);
        qb.push(" ORDER BY name ASC");

        let suppliers = qb.build_query_as::<Supplier>().fetch_all(executor).await?;
        Ok(suppliers)
    }

    pub async fn find_supplier<'e, E>(
        &self,
        executor: E,
        caller: &Caller,
        id: i32,
    ) -> Result<Option<Supplier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filter = apply_store_scope(
            Some(caller),
            Filter::new().with("id", FilterValue::Int(id)),
        );

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM suppliers");
        filter.push_where(&mut qb);

        let supplier = qb
            .build_query_as::<Supplier>()
            .fetch_optional(executor)
            .await?;
        Ok(supplier)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_supplier<'e, E>(
        &self,
        executor: E,
        store_id: i32,
        id: i32,
        name: &str,
        company: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
        address: Option<&str>,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers
            SET name = $1, company = $2, phone = $3, email = $4, address = $5,
                updated_at = NOW()
            WHERE id = $6 AND store_id = $7
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(company)
        .bind(phone)
        .bind(email)
        .bind(address)
        .bind(id)
        .bind(store_id)
        .fetch_one(executor)
        .await?;
        Ok(supplier)
    }
}
