pub mod checkout;
pub mod payment_gateway;
