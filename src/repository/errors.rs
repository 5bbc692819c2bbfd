use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Result alias used by every repository method.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failures surfaced by the persistence layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    /// A unique, foreign-key or check constraint rejected the write.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("insufficient stock for inventory item {inventory_id}")]
    InsufficientStock {
        inventory_id: i32,
        size: Option<String>,
    },
    /// The request is well-formed but refers to data that makes it invalid.
    #[error("{0}")]
    Validation(String),
    #[error("database error: {0}")]
    DatabaseError(DieselError),
    #[error("connection error: {0}")]
    ConnectionError(#[from] PoolError),
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(
                kind @ (DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::NotNullViolation),
                info,
            ) => {
                log::debug!("constraint {kind:?} rejected write: {}", info.message());
                RepositoryError::ConstraintViolation(info.message().to_string())
            }
            other => RepositoryError::DatabaseError(other),
        }
    }
}
