use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid CIDR format: {0}")]
    InvalidCidr(String),

    #[error("Malformed DNS message: {0}")]
    MalformedMessage(String),

    #[error("Exchange with {server} timed out")]
    ExchangeTimeout { server: String },

    #[error("Exchange with {server} failed: {reason}")]
    ExchangeFailed { server: String, reason: String },
}
