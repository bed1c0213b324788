// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    common::i18n::I18nStore,
    db::{
        ExpenseRepository, PartyRepository, ProductRepository, PurchaseRepository,
        ReportRepository, SaleRepository, StockRepository, StoreRepository, UserRepository,
    },
    services::{
        AuthService, InventoryService, PurchasingService, ReportService, SalesService,
        StoreService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub i18n_store: I18nStore,

    pub auth_service: AuthService,
    pub inventory_service: InventoryService,
    pub sales_service: SalesService,
    pub purchasing_service: PurchasingService,
    pub store_service: StoreService,
    pub report_service: ReportService,

    // Handlers simples (clientes, fornecedores, despesas) falam direto
    // com o repositório, sem camada de service no meio
    pub party_repo: PartyRepository,
    pub expense_repo: ExpenseRepository,
}

impl AppState {
    // A assinatura retorna um Result: se a configuração falhar,
    // a aplicação não deve iniciar.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::build(db_pool, jwt_secret))
    }

    /// Monta o gráfico de dependências a partir de uma pool já criada.
    /// (Os testes usam isto com uma pool "lazy", sem banco de verdade.)
    pub fn build(db_pool: PgPool, jwt_secret: String) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let store_repo = StoreRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let stock_repo = StockRepository::new(db_pool.clone());
        let party_repo = PartyRepository::new(db_pool.clone());
        let sale_repo = SaleRepository::new(db_pool.clone());
        let purchase_repo = PurchaseRepository::new(db_pool.clone());
        let expense_repo = ExpenseRepository::new(db_pool.clone());
        let report_repo = ReportRepository::new(db_pool.clone());

        let auth_service =
            AuthService::new(user_repo.clone(), jwt_secret.clone(), db_pool.clone());
        let inventory_service =
            InventoryService::new(product_repo.clone(), stock_repo, db_pool.clone());
        let sales_service = SalesService::new(
            sale_repo,
            product_repo.clone(),
            party_repo.clone(),
            db_pool.clone(),
        );
        let purchasing_service = PurchasingService::new(
            purchase_repo,
            party_repo.clone(),
            product_repo,
            inventory_service.clone(),
            db_pool.clone(),
        );
        let store_service = StoreService::new(
            store_repo,
            user_repo,
            auth_service.clone(),
            db_pool.clone(),
        );
        let report_service = ReportService::new(report_repo, db_pool.clone());

        Self {
            db_pool,
            jwt_secret,
            i18n_store: I18nStore::new(),
            auth_service,
            inventory_service,
            sales_service,
            purchasing_service,
            store_service,
            report_service,
            party_repo,
            expense_repo,
        }
    }
}
