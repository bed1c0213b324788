// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Nosso tipo de erro de domínio, com `thiserror` para melhor ergonomia.
// Os handlers convertem para `ApiError` (HTTP + mensagem traduzida).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Acesso negado")]
    Forbidden,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Subdomínio já em uso: {0}")]
    SubdomainAlreadyExists(String),

    #[error("SKU já em uso: {0}")]
    SkuAlreadyExists(String),

    // Caller sem loja definida tentando uma operação que exige uma
    #[error("Operação exige uma loja definida")]
    StoreRequired,

    #[error("Categoria não encontrada")]
    CategoryNotFound,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Produto desativado")]
    ProductInactive,

    #[error("Cliente não encontrado")]
    CustomerNotFound,

    #[error("Fornecedor não encontrado")]
    SupplierNotFound,

    #[error("Venda não encontrada")]
    SaleNotFound,

    #[error("Pedido de compra não encontrado")]
    PurchaseOrderNotFound,

    #[error("Estoque insuficiente para '{product}'")]
    InsufficientStock {
        product: String,
        requested: Decimal,
        available: Decimal,
    },

    // Soma dos pagamentos difere do total a pagar
    #[error("Pagamentos não fecham com o total da venda")]
    PaymentMismatch {
        expected: Decimal,
        received: Decimal,
    },

    #[error("Venda a prazo exige um cliente")]
    CreditRequiresCustomer,

    #[error("Venda já estornada")]
    SaleAlreadyVoided,

    #[error("Pedido de compra não está pendente")]
    PurchaseOrderNotPending,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O erro "pronto para HTTP": status + mensagem já traduzida + detalhes.
// É ele que implementa IntoResponse e serve de Rejection nos extratores.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => Json(json!({ "error": self.error, "details": details })),
            None => Json(json!({ "error": self.error })),
        };
        (self.status, body).into_response()
    }
}

impl AppError {
    /// Traduz o erro de domínio para uma resposta HTTP no idioma do caller.
    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let t = |code: &str| i18n.translate(&locale.0, code);

        let (status, error, details) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut fields = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    fields.insert(field.to_string(), messages);
                }
                (
                    StatusCode::BAD_REQUEST,
                    t("validation_failed"),
                    Some(json!(fields)),
                )
            }

            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, t("invalid_credentials"), None)
            }
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, t("invalid_token"), None),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, t("user_not_found"), None),
            AppError::Forbidden => (StatusCode::FORBIDDEN, t("forbidden"), None),

            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, t("email_exists"), None),
            AppError::SubdomainAlreadyExists(subdomain) => (
                StatusCode::CONFLICT,
                t("subdomain_exists"),
                Some(json!({ "subdomain": subdomain })),
            ),
            AppError::SkuAlreadyExists(sku) => (
                StatusCode::CONFLICT,
                t("sku_exists"),
                Some(json!({ "sku": sku })),
            ),

            AppError::StoreRequired => (StatusCode::BAD_REQUEST, t("store_required"), None),
            AppError::CategoryNotFound => (StatusCode::NOT_FOUND, t("category_not_found"), None),
            AppError::ProductNotFound => (StatusCode::NOT_FOUND, t("product_not_found"), None),
            AppError::ProductInactive => (StatusCode::CONFLICT, t("product_inactive"), None),
            AppError::CustomerNotFound => (StatusCode::NOT_FOUND, t("customer_not_found"), None),
            AppError::SupplierNotFound => (StatusCode::NOT_FOUND, t("supplier_not_found"), None),
            AppError::SaleNotFound => (StatusCode::NOT_FOUND, t("sale_not_found"), None),
            AppError::PurchaseOrderNotFound => {
                (StatusCode::NOT_FOUND, t("purchase_order_not_found"), None)
            }

            AppError::InsufficientStock {
                product,
                requested,
                available,
            } => (
                StatusCode::CONFLICT,
                t("insufficient_stock"),
                Some(json!({
                    "product": product,
                    "requested": requested,
                    "available": available,
                })),
            ),
            AppError::PaymentMismatch { expected, received } => (
                StatusCode::BAD_REQUEST,
                t("payment_mismatch"),
                Some(json!({ "expected": expected, "received": received })),
            ),
            AppError::CreditRequiresCustomer => (
                StatusCode::BAD_REQUEST,
                t("credit_requires_customer"),
                None,
            ),
            AppError::SaleAlreadyVoided => (StatusCode::CONFLICT, t("sale_already_voided"), None),
            AppError::PurchaseOrderNotPending => {
                (StatusCode::CONFLICT, t("purchase_order_not_pending"), None)
            }

            // Todos os outros erros viram 500. O `tracing` loga a mensagem
            // detalhada que o `thiserror` nos deu; o cliente só vê o genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, t("internal_error"), None)
            }
        };

        ApiError {
            status,
            error,
            details,
        }
    }
}
