// src/config.rs
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    pub api_base_url: String,
    pub poll_interval: Duration,
    pub confirmation_timeout: Duration,
    pub processing_delay: Duration,
    pub redirect_delay: Duration,
    pub dashboard_route: String,
}

impl CheckoutConfig {
    pub fn from_env() -> Self {
        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| "https://techrun-athech-server.onrender.com/api".to_string());

        CheckoutConfig {
            api_base_url,
            poll_interval: Duration::from_secs(env_secs("PAYMENT_POLL_INTERVAL_SECS", 3)),
            confirmation_timeout: Duration::from_secs(env_secs("PAYMENT_TIMEOUT_SECS", 120)),
            processing_delay: Duration::from_secs(env_secs("PAYMENT_PROCESSING_DELAY_SECS", 2)),
            redirect_delay: Duration::from_secs(env_secs("PAYMENT_REDIRECT_DELAY_SECS", 2)),
            dashboard_route: env::var("DASHBOARD_ROUTE").unwrap_or_else(|_| "/dashboard".to_string()),
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        CheckoutConfig {
            api_base_url: "http://localhost:10000/api".to_string(),
            poll_interval: Duration::from_secs(3),
            confirmation_timeout: Duration::from_secs(120),
            processing_delay: Duration::from_secs(2),
            redirect_delay: Duration::from_secs(2),
            dashboard_route: "/dashboard".to_string(),
        }
    }
}

fn env_secs(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
