use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Order not found")]
    EntityNotFound,
    #[error("Internal error: {0}")]
    Internal(String),
}
