// src/services/inventory_service.rs

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::{
    common::error::AppError,
    common::scope::Caller,
    db::{ProductRepository, StockRepository},
    models::catalog::{Category, Product},
    models::inventory::{StockLog, UnitType},
    services::pricing::{blend_unit_prices, UnitPrices},
};

#[derive(Clone)]
pub struct InventoryService {
    product_repo: ProductRepository,
    stock_repo: StockRepository,
    pool: PgPool,
}

impl InventoryService {
    pub fn new(product_repo: ProductRepository, stock_repo: StockRepository, pool: PgPool) -> Self {
        Self {
            product_repo,
            stock_repo,
            pool,
        }
    }

    // ---
    // Categorias
    // ---

    pub async fn create_category(
        &self,
        caller: &Caller,
        requested_store: Option<i32>,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, AppError> {
        let store_id = caller.resolve_store(requested_store)?;
        self.product_repo
            .create_category(&self.pool, store_id, name, description)
            .await
    }

    pub async fn list_categories(&self, caller: &Caller) -> Result<Vec<Category>, AppError> {
        self.product_repo.list_categories(&self.pool, caller).await
    }

    // ---
    // Produtos
    // ---

    pub async fn list_products(
        &self,
        caller: &Caller,
        category_id: Option<i32>,
        low_stock: bool,
        include_inactive: bool,
    ) -> Result<Vec<Product>, AppError> {
        self.product_repo
            .list(&self.pool, caller, category_id, low_stock, include_inactive)
            .await
    }

    pub async fn get_product(&self, caller: &Caller, id: i32) -> Result<Product, AppError> {
        self.product_repo
            .find_by_id(&self.pool, Some(caller), id)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_product(
        &self,
        caller: &Caller,
        requested_store: Option<i32>,
        category_id: Option<i32>,
        sku: &str,
        name: &str,
        description: Option<&str>,
        piece_buying_price: Decimal,
        piece_selling_price: Decimal,
        initial_quantity: Decimal,
        min_quantity: Decimal,
    ) -> Result<Product, AppError> {
        let store_id = caller.resolve_store(requested_store)?;

        let mut tx = self.pool.begin().await?;

        // A categoria (se informada) precisa existir dentro do escopo
        if let Some(category) = category_id {
            let found = self
                .product_repo
                .find_category(&mut *tx, caller, category)
                .await?
                .ok_or(AppError::CategoryNotFound)?;
            if found.store_id != store_id {
                return Err(AppError::CategoryNotFound);
            }
        }

        // Pack e dúzia nascem derivados do preço por peça
        let buying = UnitPrices::from_piece(piece_buying_price);
        let selling = UnitPrices::from_piece(piece_selling_price);

        let product = self
            .product_repo
            .create(
                &mut *tx,
                store_id,
                category_id,
                sku,
                name,
                description,
                &buying,
                &selling,
                initial_quantity,
                min_quantity,
            )
            .await?;

        tx.commit().await?;
        Ok(product)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_product(
        &self,
        caller: &Caller,
        id: i32,
        category_id: Option<i32>,
        sku: &str,
        name: &str,
        description: Option<&str>,
        piece_selling_price: Decimal,
        min_quantity: Decimal,
    ) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        let product = self
            .product_repo
            .find_by_id(&mut *tx, Some(caller), id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        if let Some(category) = category_id {
            let found = self
                .product_repo
                .find_category(&mut *tx, caller, category)
                .await?
                .ok_or(AppError::CategoryNotFound)?;
            if found.store_id != product.store_id {
                return Err(AppError::CategoryNotFound);
            }
        }

        let selling = UnitPrices::from_piece(piece_selling_price);

        let updated = self
            .product_repo
            .update_info(
                &mut *tx,
                product.store_id,
                product.id,
                category_id,
                sku,
                name,
                description,
                &selling,
                min_quantity,
            )
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn deactivate_product(&self, caller: &Caller, id: i32) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        let product = self
            .product_repo
            .find_by_id(&mut *tx, Some(caller), id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        let updated = self
            .product_repo
            .deactivate(&mut *tx, product.store_id, product.id)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    // ---
    // Recebimento de estoque (o coração do custo médio)
    // ---

    /// Dá entrada de estoque em um produto: recalcula os custos pela média
    /// ponderada, soma o saldo e grava a linha de auditoria. Tudo em uma
    /// transação.
    #[allow(clippy::too_many_arguments)]
    pub async fn receive_stock(
        &self,
        caller: &Caller,
        user_id: i32,
        product_id: i32,
        quantity: Decimal,
        unit_cost: Decimal,
        unit_type: UnitType,
        note: Option<&str>,
    ) -> Result<(Product, StockLog), AppError> {
        let mut tx = self.pool.begin().await?;

        let result = self
            .apply_receipt(
                &mut tx, caller, user_id, product_id, quantity, unit_cost, unit_type, note,
            )
            .await?;

        tx.commit().await?;
        Ok(result)
    }

    /// O passo de recebimento em si, sem transação própria: o recebimento
    /// de um pedido de compra roda isto N vezes dentro da transação dele.
    #[allow(clippy::too_many_arguments)]
    pub(crate) async fn apply_receipt(
        &self,
        conn: &mut PgConnection,
        caller: &Caller,
        user_id: i32,
        product_id: i32,
        quantity: Decimal,
        unit_cost: Decimal,
        unit_type: UnitType,
        note: Option<&str>,
    ) -> Result<(Product, StockLog), AppError> {
        let product = self
            .product_repo
            .find_by_id(&mut *conn, Some(caller), product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        if !product.is_active {
            return Err(AppError::ProductInactive);
        }

        let previous_piece_cost = product.piece_buying_price;

        // Converte o recebimento para a base "peça" e mistura com o histórico
        let buying = blend_unit_prices(
            product.quantity,
            product.piece_buying_price,
            quantity,
            unit_cost,
            unit_type,
        );
        let pieces_added = quantity * unit_type.ratio();

        let updated = self
            .product_repo
            .apply_stock_receipt(&mut *conn, product.store_id, product.id, &buying, pieces_added)
            .await?;

        let log = self
            .stock_repo
            .record_receipt(
                &mut *conn,
                product.store_id,
                product.id,
                user_id,
                quantity,
                unit_type,
                unit_cost,
                previous_piece_cost,
                buying.piece,
                note,
            )
            .await?;

        Ok((updated, log))
    }

    pub async fn list_stock_logs(
        &self,
        caller: &Caller,
        product_id: Option<i32>,
    ) -> Result<Vec<StockLog>, AppError> {
        self.stock_repo
            .list_logs(&self.pool, caller, product_id)
            .await
    }
}
