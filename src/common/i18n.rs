// src/common/i18n.rs

use std::collections::HashMap;

// Catálogo de mensagens de erro da API, por idioma.
// O extrator `Locale` (middleware/i18n.rs) decide qual tabela usar;
// se o idioma ou o código não existir, cai para o inglês.
#[derive(Clone)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages = HashMap::new();

        let mut en: HashMap<&'static str, &'static str> = HashMap::new();
        en.insert("validation_failed", "One or more fields are invalid.");
        en.insert("invalid_credentials", "Invalid e-mail or password.");
        en.insert("invalid_token", "Missing or invalid authentication token.");
        en.insert("user_not_found", "User not found.");
        en.insert("forbidden", "You do not have access to this resource.");
        en.insert("role_required", "Your role does not allow this action.");
        en.insert("email_exists", "This e-mail is already in use.");
        en.insert("subdomain_exists", "This subdomain is already in use.");
        en.insert("sku_exists", "This SKU is already in use in your store.");
        en.insert("store_required", "This operation requires a store.");
        en.insert("category_not_found", "Category not found.");
        en.insert("product_not_found", "Product not found.");
        en.insert("product_inactive", "This product has been deactivated.");
        en.insert("customer_not_found", "Customer not found.");
        en.insert("supplier_not_found", "Supplier not found.");
        en.insert("sale_not_found", "Sale not found.");
        en.insert("purchase_order_not_found", "Purchase order not found.");
        en.insert("insufficient_stock", "Not enough stock to complete the sale.");
        en.insert(
            "payment_mismatch",
            "The payments do not add up to the sale total.",
        );
        en.insert(
            "credit_requires_customer",
            "A credit payment requires a customer on the sale.",
        );
        en.insert("sale_already_voided", "This sale has already been voided.");
        en.insert(
            "purchase_order_not_pending",
            "This purchase order is no longer pending.",
        );
        en.insert("internal_error", "An unexpected error occurred.");

        let mut pt: HashMap<&'static str, &'static str> = HashMap::new();
        pt.insert("validation_failed", "Um ou mais campos são inválidos.");
        pt.insert("invalid_credentials", "E-mail ou senha inválidos.");
        pt.insert("invalid_token", "Token de autenticação inválido ou ausente.");
        pt.insert("user_not_found", "Usuário não encontrado.");
        pt.insert("forbidden", "Você não tem acesso a este recurso.");
        pt.insert("role_required", "O seu cargo não permite esta ação.");
        pt.insert("email_exists", "Este e-mail já está em uso.");
        pt.insert("subdomain_exists", "Este subdomínio já está em uso.");
        pt.insert("sku_exists", "Este SKU já está em uso na sua loja.");
        pt.insert("store_required", "Esta operação exige uma loja definida.");
        pt.insert("category_not_found", "Categoria não encontrada.");
        pt.insert("product_not_found", "Produto não encontrado.");
        pt.insert("product_inactive", "Este produto foi desativado.");
        pt.insert("customer_not_found", "Cliente não encontrado.");
        pt.insert("supplier_not_found", "Fornecedor não encontrado.");
        pt.insert("sale_not_found", "Venda não encontrada.");
        pt.insert(
            "purchase_order_not_found",
            "Pedido de compra não encontrado.",
        );
        pt.insert(
            "insufficient_stock",
            "Estoque insuficiente para concluir a venda.",
        );
        pt.insert(
            "payment_mismatch",
            "Os pagamentos não fecham com o total da venda.",
        );
        pt.insert(
            "credit_requires_customer",
            "Venda a prazo exige um cliente vinculado.",
        );
        pt.insert("sale_already_voided", "Esta venda já foi estornada.");
        pt.insert(
            "purchase_order_not_pending",
            "Este pedido de compra não está mais pendente.",
        );
        pt.insert("internal_error", "Ocorreu um erro inesperado.");

        messages.insert("en", en);
        messages.insert("pt", pt);

        Self { messages }
    }

    /// Busca a mensagem no idioma pedido, com fallback para o inglês.
    pub fn translate(&self, locale: &str, code: &str) -> String {
        self.messages
            .get(locale)
            .and_then(|table| table.get(code))
            .or_else(|| self.messages.get("en").and_then(|table| table.get(code)))
            .map(|msg| msg.to_string())
            // Último recurso: devolve o próprio código (melhor que resposta vazia)
            .unwrap_or_else(|| code.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_known_code_in_both_languages() {
        let store = I18nStore::new();
        assert_eq!(store.translate("en", "invalid_credentials"), "Invalid e-mail or password.");
        assert_eq!(store.translate("pt", "invalid_credentials"), "E-mail ou senha inválidos.");
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        let store = I18nStore::new();
        assert_eq!(store.translate("de", "forbidden"), "You do not have access to this resource.");
    }

    #[test]
    fn unknown_code_returns_the_code_itself() {
        let store = I18nStore::new();
        assert_eq!(store.translate("en", "no_such_code"), "no_such_code");
    }
}
