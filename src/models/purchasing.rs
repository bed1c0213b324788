// src/models/purchasing.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::inventory::UnitType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "purchase_order_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseOrderStatus {
    Pending,
    Received,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: i32,
    pub store_id: i32,
    pub supplier_id: i32,
    pub user_id: i32,
    pub status: PurchaseOrderStatus,

    #[schema(value_type = String, format = Date, example = "2026-09-01")]
    pub expected_date: Option<NaiveDate>,
    // Preenchido quando o pedido dá entrada no estoque
    pub received_at: Option<DateTime<Utc>>,

    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderItem {
    pub id: i32,
    pub store_id: i32,
    pub purchase_order_id: i32,
    pub product_id: i32,
    pub quantity: Decimal,
    pub unit_type: UnitType,
    pub unit_cost: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderDetail {
    #[serde(flatten)]
    pub header: PurchaseOrder,
    pub supplier_name: String,
    pub items: Vec<PurchaseOrderItem>,
}
