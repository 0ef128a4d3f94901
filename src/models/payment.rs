// src/models/payment.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Mpesa,
    Card,
    Paypal,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Mpesa => "mpesa",
            PaymentMethod::Card => "card",
            PaymentMethod::Paypal => "paypal",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "mpesa" => Ok(PaymentMethod::Mpesa),
            "card" => Ok(PaymentMethod::Card),
            "paypal" => Ok(PaymentMethod::Paypal),
            other => Err(format!("unknown payment method: {}", other)),
        }
    }
}

/// Raw form fields as entered by the user. Which fields matter depends on
/// the selected payment method.
#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    pub phone_number: String,
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
}

// STK push initiation contract
#[derive(Debug, Clone, Serialize)]
pub struct StkPushRequest {
    pub phone_number: String,
    pub amount: u64,
    pub package_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StkPushResponse {
    pub checkout_request_id: String,
}

#[derive(Debug, Deserialize)]
pub struct InitiationErrorBody {
    pub error: Option<String>,
}

/// Backend-owned transaction status. The client only ever observes this via
/// polling; once a terminal value is seen it is treated as final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Completed | TransactionStatus::Failed)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    pub checkout_request_id: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionList {
    pub transactions: Vec<Transaction>,
}

impl TransactionList {
    /// Client-side filtering over fetch-all query semantics.
    pub fn find(&self, checkout_request_id: &str) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|t| t.checkout_request_id == checkout_request_id)
    }
}
