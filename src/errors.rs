// src/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("A payment is already in progress")]
    AlreadyInFlight,

    #[error("Unknown subscription plan: {0}")]
    UnknownPlan(String),

    #[error("Payment initiation failed: {0}")]
    InitiationFailed(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Payment service error: {0}")]
    GatewayError(String),
}

impl From<serde_json::Error> for PaymentError {
    fn from(err: serde_json::Error) -> Self {
        PaymentError::GatewayError(format!("JSON parsing error: {}", err))
    }
}

// Helper conversion functions
impl PaymentError {
    pub fn validation(msg: impl Into<String>) -> Self {
        PaymentError::ValidationError(msg.into())
    }

    pub fn initiation(msg: impl Into<String>) -> Self {
        PaymentError::InitiationFailed(msg.into())
    }

    pub fn gateway(msg: impl Into<String>) -> Self {
        PaymentError::GatewayError(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;
