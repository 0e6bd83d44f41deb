//! Shared Diesel error classification for the rental repositories.
//!
//! Each repository turns a [`StoreFailure`] into its own port error, so
//! constraint names only need to be recognised in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Unique index guarding customer emails.
pub(crate) const CUSTOMER_EMAIL_KEY: &str = "customers_email_lower_key";
/// Unique constraint guarding licence plates.
pub(crate) const CAR_LICENSE_PLATE_KEY: &str = "cars_license_plate_key";
/// Partial unique index allowing one active rental per car.
pub(crate) const RENTAL_ACTIVE_CAR_KEY: &str = "rentals_active_car_key";

/// Store failure reduced to the cases repositories distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    /// A unique index rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// A foreign key rejected the write or delete.
    ForeignKeyViolation { constraint: Option<String> },
    Connection { message: String },
    Query { message: String },
}

impl StoreFailure {
    /// Whether this is a unique violation on the named constraint.
    pub fn violates_unique(&self, name: &str) -> bool {
        matches!(
            self,
            Self::UniqueViolation { constraint: Some(constraint) } if constraint == name
        )
    }
}

/// Extract a readable message from a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Classify a Diesel error, emitting debug context.
pub(crate) fn classify_diesel_error(error: DieselError) -> StoreFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            StoreFailure::ForeignKeyViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreFailure::Connection {
                message: "database connection error".to_owned(),
            }
        }
        DieselError::NotFound => StoreFailure::Query {
            message: "record not found".to_owned(),
        },
        DieselError::QueryBuilderError(_) => StoreFailure::Query {
            message: "database query error".to_owned(),
        },
        other => StoreFailure::Query {
            message: other.to_string(),
        },
    }
}
