// src/ui.rs
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// Sink for the two UI side effects the checkout flow produces: short
/// human-readable notifications and, on success, a navigation request.
pub trait CheckoutUi: Send + Sync {
    fn toast(&self, kind: ToastKind, message: &str);
    fn navigate(&self, route: &str);
}

/// Logs toasts and navigation through `tracing`; used by the CLI.
pub struct TracingUi;

impl CheckoutUi for TracingUi {
    fn toast(&self, kind: ToastKind, message: &str) {
        match kind {
            ToastKind::Error => error!("{}", message),
            ToastKind::Success | ToastKind::Info => info!("{}", message),
        }
    }

    fn navigate(&self, route: &str) {
        info!("navigating to {}", route);
    }
}
