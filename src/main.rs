// src/main.rs
use std::sync::Arc;

use anyhow::{bail, Context};
use tracing::info;

use athletech_checkout::{
    find_plan, CheckoutConfig, CheckoutCoordinator, HttpPaymentGateway, PaymentForm,
    PaymentMethod, TracingUi,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let (method, form, plan_id) = parse_args()?;
    let plan = find_plan(&plan_id)?;

    let summary = plan.order_summary();
    info!("Plan: {}", plan.name);
    info!("Subtotal: Ksh.{:.2}", summary.subtotal);
    info!("Tax: Ksh.{:.2}", summary.tax);
    info!("Total: Ksh.{:.2}", summary.total);

    let config = CheckoutConfig::from_env();
    let gateway = Arc::new(HttpPaymentGateway::new(&config)?);
    let coordinator = CheckoutCoordinator::new(gateway, Arc::new(TracingUi), config);

    coordinator.submit(method, &form, plan).await?;
    coordinator.wait().await;

    info!("Checkout finished in phase {:?}", coordinator.phase());
    Ok(())
}

/// Usage:
///   checkout <plan-id> mpesa <phone-number>
///   checkout <plan-id> card <card-number> <expiry> <cvv>
///   checkout <plan-id> paypal
fn parse_args() -> anyhow::Result<(PaymentMethod, PaymentForm, String)> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [plan_id, method_arg, rest @ ..] = args.as_slice() else {
        bail!("usage: checkout <plan-id> <mpesa|card|paypal> [fields...]");
    };

    let method: PaymentMethod = method_arg
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("invalid payment method")?;

    let mut form = PaymentForm::default();
    match method {
        PaymentMethod::Mpesa => {
            let [phone_number] = rest else {
                bail!("usage: checkout <plan-id> mpesa <phone-number>");
            };
            form.phone_number = phone_number.clone();
        }
        PaymentMethod::Card => {
            let [card_number, expiry, cvv] = rest else {
                bail!("usage: checkout <plan-id> card <card-number> <expiry> <cvv>");
            };
            form.card_number = card_number.clone();
            form.expiry = expiry.clone();
            form.cvv = cvv.clone();
        }
        PaymentMethod::Paypal => {}
    }

    Ok((method, form, plan_id.clone()))
}
