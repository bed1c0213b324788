// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Users ---
        handlers::users::create_user,
        handlers::users::list_users,

        // --- Stores ---
        handlers::stores::create_store,
        handlers::stores::list_stores,

        // --- Catalog ---
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::deactivate_product,
        handlers::products::create_category,
        handlers::products::list_categories,

        // --- Stock ---
        handlers::stock::receive_stock,
        handlers::stock::list_stock_logs,

        // --- Parties ---
        handlers::customers::create_customer,
        handlers::customers::list_customers,
        handlers::customers::update_customer,
        handlers::suppliers::create_supplier,
        handlers::suppliers::list_suppliers,
        handlers::suppliers::update_supplier,

        // --- Sales ---
        handlers::sales::create_sale,
        handlers::sales::list_sales,
        handlers::sales::get_sale,
        handlers::sales::void_sale,

        // --- Purchasing ---
        handlers::purchase_orders::create_purchase_order,
        handlers::purchase_orders::list_purchase_orders,
        handlers::purchase_orders::get_purchase_order,
        handlers::purchase_orders::receive_purchase_order,
        handlers::purchase_orders::cancel_purchase_order,

        // --- Finance ---
        handlers::expenses::create_expense,
        handlers::expenses::list_expenses,

        // --- Reports ---
        handlers::reports::get_summary,
        handlers::reports::get_sales_chart,
        handlers::reports::get_top_products,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Stores ---
            models::store::Store,
            models::store::StoreWithAdmin,
            handlers::stores::CreateStorePayload,

            // --- Users ---
            handlers::users::CreateUserPayload,

            // --- Catalog ---
            models::catalog::Category,
            models::catalog::Product,
            handlers::products::CreateProductPayload,
            handlers::products::UpdateProductPayload,
            handlers::products::CreateCategoryPayload,

            // --- Stock ---
            models::inventory::UnitType,
            models::inventory::StockLog,
            handlers::stock::ReceiveStockPayload,
            handlers::stock::ReceiveStockResponse,

            // --- Parties ---
            models::parties::Customer,
            models::parties::Supplier,
            handlers::customers::CustomerPayload,
            handlers::suppliers::SupplierPayload,

            // --- Sales ---
            models::sales::SaleStatus,
            models::sales::PaymentMethod,
            models::sales::Sale,
            models::sales::SaleItem,
            models::sales::SalePayment,
            models::sales::SaleDetail,
            handlers::sales::SaleItemPayload,
            handlers::sales::SalePaymentPayload,
            handlers::sales::CreateSalePayload,

            // --- Purchasing ---
            models::purchasing::PurchaseOrderStatus,
            models::purchasing::PurchaseOrder,
            models::purchasing::PurchaseOrderItem,
            models::purchasing::PurchaseOrderDetail,
            handlers::purchase_orders::PurchaseItemPayload,
            handlers::purchase_orders::CreatePurchaseOrderPayload,

            // --- Finance ---
            models::finance::Expense,
            handlers::expenses::CreateExpensePayload,

            // --- Reports ---
            models::reports::SummaryReport,
            models::reports::SalesChartEntry,
            models::reports::TopProductEntry,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Users", description = "Equipe da loja"),
        (name = "Stores", description = "Gestão de Lojas (multi-tenant)"),
        (name = "Catalog", description = "Produtos e Categorias"),
        (name = "Stock", description = "Entradas de Estoque e Custo Médio"),
        (name = "Parties", description = "Clientes e Fornecedores"),
        (name = "Sales", description = "Vendas com Pagamento Dividido"),
        (name = "Purchasing", description = "Pedidos de Compra"),
        (name = "Finance", description = "Despesas"),
        (name = "Reports", description = "Indicadores e Gráficos Gerenciais")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
