// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Despesa operacional da loja (aluguel, energia, frete...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i32,
    pub store_id: i32,
    pub user_id: i32,

    #[schema(example = "Aluguel")]
    pub category: Option<String>,
    #[schema(example = "Aluguel do ponto, agosto")]
    pub description: String,

    #[schema(example = "1200.00")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-08-01")]
    pub incurred_on: NaiveDate,

    pub created_at: DateTime<Utc>,
}
