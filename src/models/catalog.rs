// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub store_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// Produto
// ---
// Os preços de pack e dúzia são SEMPRE derivados do preço por peça
// (pack = 3x, dúzia = 12x) depois de qualquer atualização de custo.
// `quantity` é o saldo em PEÇAS. Produto nunca é apagado, só desativado.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub store_id: i32,
    pub category_id: Option<i32>,

    #[schema(example = "ARZ-5KG")]
    pub sku: String,
    #[schema(example = "Arroz 5kg")]
    pub name: String,
    pub description: Option<String>,

    // Custo médio ponderado, por granularidade
    #[schema(example = "96.67")]
    pub piece_buying_price: Decimal,
    pub pack_buying_price: Decimal,
    pub dozen_buying_price: Decimal,

    // Preço de venda, por granularidade
    pub piece_selling_price: Decimal,
    pub pack_selling_price: Decimal,
    pub dozen_selling_price: Decimal,

    // Saldo em peças
    pub quantity: Decimal,
    // Abaixo disso o produto entra no alerta de estoque baixo
    pub min_quantity: Decimal,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
