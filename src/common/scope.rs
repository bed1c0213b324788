// src/common/scope.rs

use std::collections::BTreeMap;

use sqlx::{Postgres, QueryBuilder};

use crate::common::error::AppError;
use crate::models::auth::Role;

// Sentinela que não corresponde a loja nenhuma. Um caller ausente ou sem
// loja definida enxerga ZERO linhas (negar por padrão, nunca liberar).
pub const NO_STORE_SENTINEL: i32 = -1;

// ---
// Filter: o "where clause" como um mapeamento campo -> valor
// ---
// Os repositórios montam um Filter, passam pelo escopo de loja e só então
// renderizam o SQL. Os valores SEMPRE viram binds ($1, $2...), nunca são
// interpolados na string.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Int(i32),
    Text(String),
    Bool(bool),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: BTreeMap<&'static str, FilterValue>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adiciona (ou sobrescreve) uma igualdade `coluna = valor`.
    pub fn set(&mut self, column: &'static str, value: FilterValue) {
        self.fields.insert(column, value);
    }

    /// Versão encadeável do `set`, para montar filtros em uma expressão.
    pub fn with(mut self, column: &'static str, value: FilterValue) -> Self {
        self.set(column, value);
        self
    }

    pub fn get(&self, column: &'static str) -> Option<&FilterValue> {
        self.fields.get(column)
    }

    /// Renderiza `WHERE a = $1 AND b = $2 ...` no QueryBuilder.
    /// Retorna quantas condições foram escritas (0 = nenhum WHERE emitido),
    /// para o chamador saber se condições extras começam com WHERE ou AND.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) -> usize {
        let mut separator = " WHERE ";
        for (column, value) in &self.fields {
            qb.push(separator);
            qb.push(*column);
            qb.push(" = ");
            match value {
                FilterValue::Int(v) => {
                    qb.push_bind(*v);
                }
                FilterValue::Text(v) => {
                    qb.push_bind(v.clone());
                }
                FilterValue::Bool(v) => {
                    qb.push_bind(*v);
                }
            }
            separator = " AND ";
        }
        self.fields.len()
    }
}

// ---
// Caller: quem está fazendo a requisição (cargo + loja)
// ---
#[derive(Debug, Clone, PartialEq)]
pub struct Caller {
    pub role: Role,
    pub store_id: Option<i32>,
}

impl Caller {
    /// A loja que deve restringir as LEITURAS deste caller.
    /// `None` = visão global (super admin); `Some(-1)` = caller sem loja,
    /// não enxerga nada.
    pub fn scope_store_id(&self) -> Option<i32> {
        if self.role.is_privileged() {
            None
        } else {
            Some(self.store_id.unwrap_or(NO_STORE_SENTINEL))
        }
    }

    /// A loja onde uma ESCRITA deve acontecer. Um caller comum escreve
    /// sempre na própria loja (o `requested` é ignorado); o super admin
    /// precisa dizer explicitamente em qual loja está operando.
    pub fn resolve_store(&self, requested: Option<i32>) -> Result<i32, AppError> {
        if self.role.is_privileged() {
            requested.ok_or(AppError::StoreRequired)
        } else {
            self.store_id.ok_or(AppError::StoreRequired)
        }
    }
}

/// Injeta a restrição de loja no filtro, conforme o caller:
/// - super admin: filtro inalterado (visão entre lojas);
/// - caller comum: `store_id = <loja do caller>` (sobrescreve se já houver);
/// - caller comum SEM loja, ou caller ausente: `store_id = -1` (sentinela).
///
/// Todo caminho de leitura/escrita de entidades com `store_id` passa por
/// aqui antes de tocar o banco.
pub fn apply_store_scope(caller: Option<&Caller>, mut filter: Filter) -> Filter {
    match caller {
        Some(c) if c.role.is_privileged() => filter,
        Some(c) => {
            filter.set(
                "store_id",
                FilterValue::Int(c.store_id.unwrap_or(NO_STORE_SENTINEL)),
            );
            filter
        }
        None => {
            filter.set("store_id", FilterValue::Int(NO_STORE_SENTINEL));
            filter
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_filter() -> Filter {
        Filter::new().with("category_id", FilterValue::Int(5))
    }

    #[test]
    fn super_admin_keeps_filter_unchanged() {
        let caller = Caller {
            role: Role::SuperAdmin,
            store_id: Some(7),
        };
        let scoped = apply_store_scope(Some(&caller), base_filter());
        assert_eq!(scoped, base_filter());
        assert!(scoped.get("store_id").is_none());
    }

    #[test]
    fn admin_is_pinned_to_own_store() {
        let caller = Caller {
            role: Role::Admin,
            store_id: Some(3),
        };
        let scoped = apply_store_scope(Some(&caller), base_filter());
        assert_eq!(scoped.get("category_id"), Some(&FilterValue::Int(5)));
        assert_eq!(scoped.get("store_id"), Some(&FilterValue::Int(3)));
    }

    #[test]
    fn missing_caller_scopes_to_sentinel() {
        let scoped = apply_store_scope(None, base_filter());
        assert_eq!(scoped.get("category_id"), Some(&FilterValue::Int(5)));
        assert_eq!(
            scoped.get("store_id"),
            Some(&FilterValue::Int(NO_STORE_SENTINEL))
        );
    }

    #[test]
    fn caller_without_store_scopes_to_sentinel() {
        let caller = Caller {
            role: Role::Manager,
            store_id: None,
        };
        let scoped = apply_store_scope(Some(&caller), Filter::new());
        assert_eq!(
            scoped.get("store_id"),
            Some(&FilterValue::Int(NO_STORE_SENTINEL))
        );
    }

    #[test]
    fn scope_overwrites_a_forged_store_id() {
        // Um filtro vindo de fora tentando espiar outra loja é sobrescrito.
        let caller = Caller {
            role: Role::Sales,
            store_id: Some(2),
        };
        let forged = Filter::new().with("store_id", FilterValue::Int(99));
        let scoped = apply_store_scope(Some(&caller), forged);
        assert_eq!(scoped.get("store_id"), Some(&FilterValue::Int(2)));
    }

    #[test]
    fn push_where_renders_binds_in_field_order() {
        let caller = Caller {
            role: Role::Admin,
            store_id: Some(3),
        };
        let scoped = apply_store_scope(Some(&caller), base_filter());

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM products");
        let written = scoped.push_where(&mut qb);

        assert_eq!(written, 2);
        assert_eq!(
            qb.into_sql(),
            "SELECT * FROM products WHERE category_id = $1 AND store_id = $2"
        );
    }

    #[test]
    fn empty_filter_writes_no_where() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM stores");
        let written = Filter::new().push_where(&mut qb);
        assert_eq!(written, 0);
        assert_eq!(qb.into_sql(), "SELECT * FROM stores");
    }

    #[test]
    fn resolve_store_rules() {
        let admin = Caller {
            role: Role::Admin,
            store_id: Some(4),
        };
        // Caller comum escreve na própria loja mesmo pedindo outra
        assert_eq!(admin.resolve_store(Some(9)).unwrap(), 4);

        let root = Caller {
            role: Role::SuperAdmin,
            store_id: None,
        };
        assert_eq!(root.resolve_store(Some(9)).unwrap(), 9);
        assert!(matches!(
            root.resolve_store(None),
            Err(AppError::StoreRequired)
        ));
    }
}
