// src/lib.rs
//
// Checkout client for the AthleTech platform: subscription plan pricing,
// payment form validation, and the M-Pesa STK push confirmation flow.

pub mod config;
pub mod errors;
pub mod models;
pub mod phone;
pub mod services;
pub mod ui;

pub use config::CheckoutConfig;
pub use errors::{PaymentError, Result};
pub use models::payment::{PaymentForm, PaymentMethod};
pub use models::plan::{find_plan, SubscriptionPlan, SUBSCRIPTION_PLANS};
pub use models::session::PaymentPhase;
pub use services::checkout::CheckoutCoordinator;
pub use services::payment_gateway::{HttpPaymentGateway, PaymentGateway};
pub use ui::{CheckoutUi, ToastKind, TracingUi};
