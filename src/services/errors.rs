use thiserror::Error;

use crate::repository::RepositoryError;

/// Result alias returned by every service function.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures a service can report to the HTTP layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller may not see or touch the resource.
    #[error("Unauthorized")]
    Unauthorized,
    /// The caller's role does not allow the operation.
    #[error("Forbidden")]
    Forbidden,
    /// Login with a password that does not match the account.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    /// Payload failed validation.
    #[error("{0}")]
    Form(String),
    #[error("{0}")]
    InsufficientStock(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConstraintViolation(message) => ServiceError::Conflict(message),
            RepositoryError::InsufficientStock { inventory_id, size } => {
                ServiceError::InsufficientStock(match size {
                    Some(size) => format!("Insufficient inventory for item {inventory_id} size {size}"),
                    None => format!("Insufficient inventory for item {inventory_id}"),
                })
            }
            RepositoryError::Validation(message) => ServiceError::Form(message),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_errors_map_to_service_errors() {
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::Validation("Invalid inventory ID".into())),
            ServiceError::Form(message) if message == "Invalid inventory ID"
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::InsufficientStock {
                inventory_id: 4,
                size: Some("M".into())
            }),
            ServiceError::InsufficientStock(message) if message.contains("size M")
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::ConstraintViolation("UNIQUE".into())),
            ServiceError::Conflict(_)
        ));
    }
}
