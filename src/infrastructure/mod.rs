pub mod address_repo;
pub mod category_repo;
pub mod models;
pub mod order_repo;
pub mod product_repo;
pub mod store_repo;
pub mod user_repo;

#[cfg(test)]
pub mod memory;
#[cfg(test)]
mod test_db;

use diesel::result::DatabaseErrorKind;

use crate::domain::errors::DomainError;

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::DatabaseError(
                kind @ (DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation),
                info,
            ) => {
                log::warn!(
                    "constraint violation ({:?}) on {}: {}",
                    kind,
                    info.constraint_name().unwrap_or("unknown constraint"),
                    info.message()
                );
                DomainError::Conflict(conflict_message(&kind, info.constraint_name()).to_string())
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}

/// Client-facing text for a constraint violation. Never echoes the
/// database's own message, which names tables and constraints.
fn conflict_message(kind: &DatabaseErrorKind, constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("users_phone_key") => "phone number already registered",
        Some("users_email_key") => "email already registered",
        Some("orders_address_id_fkey") => "address is used by an order",
        Some("products_category_id_fkey") => "category is missing or still used by products",
        _ if matches!(kind, DatabaseErrorKind::UniqueViolation) => "duplicate value",
        _ => "record is still referenced",
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

/// `%term%` for `ILIKE`, with the wildcard characters in `term` escaped.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
