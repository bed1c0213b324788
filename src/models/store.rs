// src/models/store.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::auth::User;

// ---
// Store (a Loja / o tenant)
// ---
// Toda entidade de negócio mutável carrega um store_id apontando para cá.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: i32,
    #[schema(example = "Mercearia Central")]
    pub name: String,
    // Usado como identificador público da loja (ex: central.pdv.app)
    #[schema(example = "central")]
    pub subdomain: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Resposta da criação atômica loja + admin
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreWithAdmin {
    pub store: Store,
    pub admin: User,
}
