use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or missing input, e.g. an order id that is not 24 hex chars.
    #[error("Bad request: {0}")]
    BadRequest(String),
    /// A write that makes no sense for the order's current identity.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Not configured: {0}")]
    NotConfigured(String),
    #[error("Storage error: {0}")]
    Storage(String),
}
