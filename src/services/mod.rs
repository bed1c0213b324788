pub mod auth_service;
pub mod inventory_service;
pub mod pricing;
pub mod purchasing_service;
pub mod report_service;
pub mod sales_service;
pub mod store_service;

pub use auth_service::AuthService;
pub use inventory_service::InventoryService;
pub use purchasing_service::PurchasingService;
pub use report_service::ReportService;
pub use sales_service::SalesService;
pub use store_service::StoreService;
