// src/services/sales_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::scope::Caller,
    db::{PartyRepository, ProductRepository, SaleRepository},
    models::inventory::UnitType,
    models::sales::{PaymentMethod, Sale, SaleDetail, SaleStatus},
    services::pricing::round2,
};

// Entradas já validadas pelo handler (o service só aplica regra de negócio)
#[derive(Debug, Clone)]
pub struct SaleItemInput {
    pub product_id: i32,
    pub quantity: Decimal,
    pub unit_type: UnitType,
    // None = usa o preço de venda cadastrado para a granularidade
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Clone)]
pub struct SalePaymentInput {
    pub method: PaymentMethod,
    pub amount: Decimal,
}

#[derive(Clone)]
pub struct SalesService {
    sale_repo: SaleRepository,
    product_repo: ProductRepository,
    party_repo: PartyRepository,
    pool: PgPool,
}

impl SalesService {
    pub fn new(
        sale_repo: SaleRepository,
        product_repo: ProductRepository,
        party_repo: PartyRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            sale_repo,
            product_repo,
            party_repo,
            pool,
        }
    }

    /// Registra uma venda completa: itens, baixa de estoque e pagamento
    /// dividido, tudo em uma transação. A soma dos pagamentos precisa bater
    /// EXATAMENTE com o total menos o desconto.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_sale(
        &self,
        caller: &Caller,
        user_id: i32,
        requested_store: Option<i32>,
        customer_id: Option<i32>,
        items: &[SaleItemInput],
        payments: &[SalePaymentInput],
        discount: Decimal,
    ) -> Result<SaleDetail, AppError> {
        let store_id = caller.resolve_store(requested_store)?;

        // Venda a prazo sem cliente não tem de quem cobrar depois
        let has_credit = payments
            .iter()
            .any(|p| p.method == PaymentMethod::Credit);
        if has_credit && customer_id.is_none() {
            return Err(AppError::CreditRequiresCustomer);
        }

        let mut tx = self.pool.begin().await?;

        if let Some(customer) = customer_id {
            let found = self
                .party_repo
                .find_customer(&mut *tx, caller, customer)
                .await?
                .ok_or(AppError::CustomerNotFound)?;
            if found.store_id != store_id {
                return Err(AppError::CustomerNotFound);
            }
        }

        // 1. Valida os itens e dá baixa no estoque
        let mut prepared = Vec::with_capacity(items.len());
        let mut total = Decimal::ZERO;

        for item in items {
            let product = self
                .product_repo
                .find_by_id(&mut *tx, Some(caller), item.product_id)
                .await?
                .ok_or(AppError::ProductNotFound)?;

            if product.store_id != store_id {
                return Err(AppError::ProductNotFound);
            }
            if !product.is_active {
                return Err(AppError::ProductInactive);
            }

            let pieces_needed = item.quantity * item.unit_type.ratio();
            if product.quantity < pieces_needed {
                return Err(AppError::InsufficientStock {
                    product: product.name,
                    requested: pieces_needed,
                    available: product.quantity,
                });
            }

            let unit_price = item.unit_price.unwrap_or(match item.unit_type {
                UnitType::Piece => product.piece_selling_price,
                UnitType::Pack => product.pack_selling_price,
                UnitType::Dozen => product.dozen_selling_price,
            });
            let subtotal = round2(item.quantity * unit_price);
            total += subtotal;

            self.product_repo
                .adjust_quantity(&mut *tx, store_id, product.id, -pieces_needed)
                .await?;

            prepared.push((item.clone(), unit_price, subtotal));
        }

        // 2. Confere o pagamento dividido contra o total
        let total = round2(total);
        let payable = round2(total - discount);
        let paid = round2(payments.iter().map(|p| p.amount).sum::<Decimal>());
        if paid != payable {
            return Err(AppError::PaymentMismatch {
                expected: payable,
                received: paid,
            });
        }

        // 3. Grava venda, itens e pagamentos
        let sale = self
            .sale_repo
            .insert_sale(
                &mut *tx,
                store_id,
                user_id,
                customer_id,
                Uuid::new_v4(),
                total,
                discount,
            )
            .await?;

        let mut sale_items = Vec::with_capacity(prepared.len());
        for (item, unit_price, subtotal) in prepared {
            let row = self
                .sale_repo
                .insert_item(
                    &mut *tx,
                    store_id,
                    sale.id,
                    item.product_id,
                    item.quantity,
                    item.unit_type,
                    unit_price,
                    subtotal,
                )
                .await?;
            sale_items.push(row);
        }

        let mut sale_payments = Vec::with_capacity(payments.len());
        for payment in payments {
            let row = self
                .sale_repo
                .insert_payment(&mut *tx, store_id, sale.id, payment.method, payment.amount)
                .await?;
            sale_payments.push(row);
        }

        tx.commit().await?;

        let customer_name = match sale.customer_id {
            Some(customer) => self.sale_repo.customer_name(&self.pool, customer).await?,
            None => None,
        };
        let cashier_name = self.sale_repo.cashier_name(&self.pool, sale.user_id).await?;

        Ok(SaleDetail {
            header: sale,
            customer_name,
            cashier_name,
            items: sale_items,
            payments: sale_payments,
        })
    }

    pub async fn list_sales(&self, caller: &Caller) -> Result<Vec<Sale>, AppError> {
        self.sale_repo.list(&self.pool, caller).await
    }

    pub async fn get_sale(&self, caller: &Caller, id: i32) -> Result<SaleDetail, AppError> {
        let sale = self
            .sale_repo
            .find_by_id(&self.pool, caller, id)
            .await?
            .ok_or(AppError::SaleNotFound)?;

        let items = self.sale_repo.list_items(&self.pool, sale.id).await?;
        let payments = self.sale_repo.list_payments(&self.pool, sale.id).await?;

        let customer_name = match sale.customer_id {
            Some(customer) => self.sale_repo.customer_name(&self.pool, customer).await?,
            None => None,
        };
        let cashier_name = self.sale_repo.cashier_name(&self.pool, sale.user_id).await?;

        Ok(SaleDetail {
            header: sale,
            customer_name,
            cashier_name,
            items,
            payments,
        })
    }

    /// Estorna uma venda: devolve as quantidades ao estoque e marca como
    /// VOIDED. Estornar duas vezes é erro (devolveria estoque em dobro).
    pub async fn void_sale(&self, caller: &Caller, id: i32) -> Result<Sale, AppError> {
        let mut tx = self.pool.begin().await?;

        let sale = self
            .sale_repo
            .find_by_id(&mut *tx, caller, id)
            .await?
            .ok_or(AppError::SaleNotFound)?;

        if sale.status == SaleStatus::Voided {
            return Err(AppError::SaleAlreadyVoided);
        }

        let items = self.sale_repo.list_items(&mut *tx, sale.id).await?;
        for item in items {
            let pieces = item.quantity * item.unit_type.ratio();
            self.product_repo
                .adjust_quantity(&mut *tx, sale.store_id, item.product_id, pieces)
                .await?;
        }

        let voided = self
            .sale_repo
            .set_status(&mut *tx, sale.store_id, sale.id, SaleStatus::Voided)
            .await?;

        tx.commit().await?;
        Ok(voided)
    }
}
