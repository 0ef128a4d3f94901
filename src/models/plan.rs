// src/models/plan.rs
use crate::errors::{PaymentError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionPlan {
    pub id: &'static str,
    pub name: &'static str,
    pub tier: &'static str,
    /// Whole Kenyan shillings.
    pub price: f64,
}

pub const SUBSCRIPTION_PLANS: &[SubscriptionPlan] = &[
    SubscriptionPlan {
        id: "free",
        name: "Free",
        tier: "free",
        price: 0.0,
    },
    SubscriptionPlan {
        id: "pro",
        name: "Pro",
        tier: "pro",
        price: 2990.0,
    },
    SubscriptionPlan {
        id: "premium",
        name: "Premium",
        tier: "premium",
        price: 4990.0,
    },
];

pub fn find_plan(plan_id: &str) -> Result<&'static SubscriptionPlan> {
    SUBSCRIPTION_PLANS
        .iter()
        .find(|p| p.id == plan_id)
        .ok_or_else(|| PaymentError::UnknownPlan(plan_id.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderSummary {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl SubscriptionPlan {
    /// 10% tax, rounded to the nearest cent on the scaled value.
    pub fn order_summary(&self) -> OrderSummary {
        let tax = (self.price * 10.0).round() / 100.0;
        OrderSummary {
            subtotal: self.price,
            tax,
            total: self.price + tax,
        }
    }

    /// Amount charged at checkout, in whole shillings.
    pub fn charge_amount(&self) -> u64 {
        self.order_summary().total.round() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pro_plan_pricing() {
        let plan = find_plan("pro").unwrap();
        let summary = plan.order_summary();
        assert_eq!(summary.subtotal, 2990.0);
        assert_eq!(summary.tax, 299.0);
        assert_eq!(summary.total, 3289.0);
        assert_eq!(plan.charge_amount(), 3289);
    }

    #[test]
    fn free_plan_has_zero_total() {
        let summary = find_plan("free").unwrap().order_summary();
        assert_eq!(summary.total, 0.0);
    }

    #[test]
    fn unknown_plan_is_rejected() {
        assert!(matches!(
            find_plan("enterprise"),
            Err(PaymentError::UnknownPlan(_))
        ));
    }
}
