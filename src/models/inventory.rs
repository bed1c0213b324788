// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// ---
// Granularidade de uma transação de estoque
// ---
// As razões são FIXAS (não configuráveis): pack = 3 peças, dúzia = 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "unit_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitType {
    Piece,
    Pack,
    Dozen,
}

impl UnitType {
    /// Quantas PEÇAS cabem em uma unidade desta granularidade.
    pub fn ratio(&self) -> Decimal {
        match self {
            UnitType::Piece => Decimal::ONE,
            UnitType::Pack => Decimal::from(3),
            UnitType::Dozen => Decimal::from(12),
        }
    }
}

// ---
// StockLog (auditoria de entradas)
// ---
// Uma linha por recebimento de estoque: o evento em si não persiste além
// do produto que ele atualiza, mas o log guarda o antes/depois do custo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockLog {
    pub id: i32,
    pub store_id: i32,
    pub product_id: i32,
    pub user_id: i32,

    // Quantidade e custo NA GRANULARIDADE recebida (ex: 2 packs a 285.00)
    pub quantity: Decimal,
    pub unit_type: UnitType,
    pub unit_cost: Decimal,

    // Custo médio por peça antes e depois da mistura
    pub previous_piece_cost: Decimal,
    pub new_piece_cost: Decimal,

    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios_are_fixed() {
        assert_eq!(UnitType::Piece.ratio(), Decimal::ONE);
        assert_eq!(UnitType::Pack.ratio(), Decimal::from(3));
        assert_eq!(UnitType::Dozen.ratio(), Decimal::from(12));
    }
}
