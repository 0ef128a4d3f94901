// src/services/payment_gateway.rs
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info};

use crate::config::CheckoutConfig;
use crate::errors::{PaymentError, Result};
use crate::models::payment::{InitiationErrorBody, StkPushRequest, StkPushResponse, TransactionList};

/// Remote payment surface the checkout flow depends on: STK push initiation
/// and the fetch-all transaction query the confirmation poll runs against.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn initiate_stk_push(&self, request: &StkPushRequest) -> Result<StkPushResponse>;
    async fn list_transactions(&self) -> Result<TransactionList>;
}

#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    base_url: String,
    client: Client,
}

impl HttpPaymentGateway {
    pub fn new(config: &CheckoutConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(HttpPaymentGateway {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn initiate_stk_push(&self, request: &StkPushRequest) -> Result<StkPushResponse> {
        info!(
            "STK push for {} - KSh {} ({})",
            request.phone_number, request.amount, request.package_type
        );

        let url = format!("{}/payments/mpesa/stk-push", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("STK push failed: {} - {}", status, body);

            // Surface the server's error text when the body carries one.
            let message = serde_json::from_str::<InitiationErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| format!("payment service returned {}", status));
            return Err(PaymentError::initiation(message));
        }

        let stk_response: StkPushResponse = response.json().await?;
        info!("STK push initiated: {}", stk_response.checkout_request_id);
        Ok(stk_response)
    }

    async fn list_transactions(&self) -> Result<TransactionList> {
        let url = format!("{}/payments/transactions", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(PaymentError::gateway(format!(
                "transaction query returned {}",
                status
            )));
        }

        Ok(response.json().await?)
    }
}
