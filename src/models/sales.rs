// src/models/sales.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::inventory::UnitType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sale_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleStatus {
    Completed,
    Voided,
}

// CREDIT = venda a prazo (exige cliente vinculado).
// A integração com gateways fica fora daqui: só registramos o método.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    MobileMoney,
    Credit,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i32,
    pub store_id: i32,
    // O caixa que registrou a venda
    pub user_id: i32,
    pub customer_id: Option<i32>,

    // Referência pública impressa no comprovante
    pub reference: Uuid,

    #[schema(example = "150.50")]
    pub total_amount: Decimal,
    pub discount: Decimal,
    pub status: SaleStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: i32,
    pub store_id: i32,
    pub sale_id: i32,
    pub product_id: i32,
    pub quantity: Decimal,
    pub unit_type: UnitType,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalePayment {
    pub id: i32,
    pub store_id: i32,
    pub sale_id: i32,
    pub method: PaymentMethod,
    pub amount: Decimal,
}

// Venda completa para a tela de detalhe / comprovante
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    #[serde(flatten)]
    pub header: Sale,
    pub customer_name: Option<String>,
    pub cashier_name: String,
    pub items: Vec<SaleItem>,
    pub payments: Vec<SalePayment>,
}
