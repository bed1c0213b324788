pub mod auth;
pub mod customers;
pub mod expenses;
pub mod products;
pub mod purchase_orders;
pub mod reports;
pub mod sales;
pub mod stock;
pub mod stores;
pub mod suppliers;
pub mod users;

use rust_decimal::Decimal;
use validator::ValidationError;

// ---
// Validações customizadas compartilhadas pelos payloads
// ---

pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

pub(crate) fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor precisa ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}
