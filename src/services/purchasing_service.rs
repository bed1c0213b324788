// src/services/purchasing_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    common::scope::Caller,
    db::{PartyRepository, ProductRepository, PurchaseRepository},
    models::inventory::UnitType,
    models::purchasing::{PurchaseOrder, PurchaseOrderDetail, PurchaseOrderStatus},
    services::inventory_service::InventoryService,
};

#[derive(Debug, Clone)]
pub struct PurchaseItemInput {
    pub product_id: i32,
    pub quantity: Decimal,
    pub unit_type: UnitType,
    pub unit_cost: Decimal,
}

#[derive(Clone)]
pub struct PurchasingService {
    purchase_repo: PurchaseRepository,
    party_repo: PartyRepository,
    product_repo: ProductRepository,
    // O recebimento de um pedido reaproveita o mesmo passo de entrada
    // de estoque do InventoryService (custo médio + auditoria)
    inventory_service: InventoryService,
    pool: PgPool,
}

impl PurchasingService {
    pub fn new(
        purchase_repo: PurchaseRepository,
        party_repo: PartyRepository,
        product_repo: ProductRepository,
        inventory_service: InventoryService,
        pool: PgPool,
    ) -> Self {
        Self {
            purchase_repo,
            party_repo,
            product_repo,
            inventory_service,
            pool,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_order(
        &self,
        caller: &Caller,
        user_id: i32,
        requested_store: Option<i32>,
        supplier_id: i32,
        expected_date: Option<NaiveDate>,
        notes: Option<&str>,
        items: &[PurchaseItemInput],
    ) -> Result<PurchaseOrderDetail, AppError> {
        let store_id = caller.resolve_store(requested_store)?;

        let mut tx = self.pool.begin().await?;

        let supplier = self
            .party_repo
            .find_supplier(&mut *tx, caller, supplier_id)
            .await?
            .ok_or(AppError::SupplierNotFound)?;
        if supplier.store_id != store_id {
            return Err(AppError::SupplierNotFound);
        }

        let order = self
            .purchase_repo
            .insert_order(&mut *tx, store_id, supplier_id, user_id, expected_date, notes)
            .await?;

        let mut order_items = Vec::with_capacity(items.len());
        for item in items {
            let product = self
                .product_repo
                .find_by_id(&mut *tx, Some(caller), item.product_id)
                .await?
                .ok_or(AppError::ProductNotFound)?;
            if product.store_id != store_id {
                return Err(AppError::ProductNotFound);
            }

            let row = self
                .purchase_repo
                .insert_item(
                    &mut *tx,
                    store_id,
                    order.id,
                    item.product_id,
                    item.quantity,
                    item.unit_type,
                    item.unit_cost,
                )
                .await?;
            order_items.push(row);
        }

        tx.commit().await?;

        Ok(PurchaseOrderDetail {
            header: order,
            supplier_name: supplier.name,
            items: order_items,
        })
    }

    pub async fn list_orders(
        &self,
        caller: &Caller,
        status: Option<PurchaseOrderStatus>,
    ) -> Result<Vec<PurchaseOrder>, AppError> {
        self.purchase_repo.list(&self.pool, caller, status).await
    }

    pub async fn get_order(
        &self,
        caller: &Caller,
        id: i32,
    ) -> Result<PurchaseOrderDetail, AppError> {
        let order = self
            .purchase_repo
            .find_by_id(&self.pool, caller, id)
            .await?
            .ok_or(AppError::PurchaseOrderNotFound)?;

        let items = self.purchase_repo.list_items(&self.pool, order.id).await?;
        let supplier_name = self
            .purchase_repo
            .supplier_name(&self.pool, order.supplier_id)
            .await?;

        Ok(PurchaseOrderDetail {
            header: order,
            supplier_name,
            items,
        })
    }

    /// Dá entrada no estoque de TODOS os itens do pedido (média ponderada
    /// item a item) e marca o pedido como recebido. Só pedidos pendentes.
    pub async fn receive_order(
        &self,
        caller: &Caller,
        user_id: i32,
        id: i32,
    ) -> Result<PurchaseOrderDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let order = self
            .purchase_repo
            .find_by_id(&mut *tx, caller, id)
            .await?
            .ok_or(AppError::PurchaseOrderNotFound)?;

        if order.status != PurchaseOrderStatus::Pending {
            return Err(AppError::PurchaseOrderNotPending);
        }

        let items = self.purchase_repo.list_items(&mut *tx, order.id).await?;
        let note = format!("Pedido de compra #{}", order.id);

        for item in &items {
            self.inventory_service
                .apply_receipt(
                    &mut tx,
                    caller,
                    user_id,
                    item.product_id,
                    item.quantity,
                    item.unit_cost,
                    item.unit_type,
                    Some(note.as_str()),
                )
                .await?;
        }

        let received = self
            .purchase_repo
            .mark_received(&mut *tx, order.store_id, order.id)
            .await?;

        tx.commit().await?;

        let supplier_name = self
            .purchase_repo
            .supplier_name(&self.pool, received.supplier_id)
            .await?;

        Ok(PurchaseOrderDetail {
            header: received,
            supplier_name,
            items,
        })
    }

    pub async fn cancel_order(&self, caller: &Caller, id: i32) -> Result<PurchaseOrder, AppError> {
        let mut tx = self.pool.begin().await?;

        let order = self
            .purchase_repo
            .find_by_id(&mut *tx, caller, id)
            .await?
            .ok_or(AppError::PurchaseOrderNotFound)?;

        if order.status != PurchaseOrderStatus::Pending {
            return Err(AppError::PurchaseOrderNotPending);
        }

        let cancelled = self
            .purchase_repo
            .mark_cancelled(&mut *tx, order.store_id, order.id)
            .await?;

        tx.commit().await?;
        Ok(cancelled)
    }
}
