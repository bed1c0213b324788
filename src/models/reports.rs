// src/models/reports.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Indicadores do dia para o painel gerencial
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub sales_today: Decimal,
    pub sales_count_today: i64,
    pub expenses_today: Decimal,
    pub low_stock_count: i64,
    // Valor do estoque a custo médio (quantidade x custo por peça)
    pub inventory_value: Decimal,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesChartEntry {
    #[schema(example = "2026-08-07")]
    pub date: String,
    pub total: Decimal,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopProductEntry {
    pub product_name: String,
    pub total_quantity: Decimal,
    pub total_revenue: Decimal,
}
