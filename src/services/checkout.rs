// src/services/checkout.rs
//
// Drives one checkout attempt from form submission through confirmation or
// failure. The M-Pesa path is asynchronous: the user approves the payment on
// their phone while this coordinator polls the transaction list until it
// observes a terminal status or the confirmation budget runs out.

use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::CheckoutConfig;
use crate::errors::{PaymentError, Result};
use crate::models::payment::{PaymentForm, PaymentMethod, StkPushRequest, TransactionStatus};
use crate::models::plan::SubscriptionPlan;
use crate::models::session::{PaymentPhase, PaymentSession};
use crate::phone;
use crate::services::payment_gateway::PaymentGateway;
use crate::ui::{CheckoutUi, ToastKind};

pub const STK_SENT_MESSAGE: &str =
    "STK push sent! Please check your phone and enter your M-Pesa PIN.";
pub const PAYMENT_SUCCESS_MESSAGE: &str = "Payment successful! Subscription activated.";
pub const PAYMENT_FAILED_MESSAGE: &str = "Payment failed. Please try again.";
pub const PAYMENT_TIMEOUT_MESSAGE: &str =
    "Payment timeout. Please check your phone and try again.";

/// Owned timers for one active attempt. The poll interval and the timeout
/// both live inside a single spawned task; cancelling the token tears both
/// down before their next firing.
struct ConfirmationTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl ConfirmationTask {
    fn cancel(&self) {
        self.token.cancel();
    }
}

pub struct CheckoutCoordinator {
    gateway: Arc<dyn PaymentGateway>,
    ui: Arc<dyn CheckoutUi>,
    config: CheckoutConfig,
    session: Arc<Mutex<PaymentSession>>,
    task: Mutex<Option<ConfirmationTask>>,
}

impl CheckoutCoordinator {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        ui: Arc<dyn CheckoutUi>,
        config: CheckoutConfig,
    ) -> Self {
        CheckoutCoordinator {
            gateway,
            ui,
            config,
            session: Arc::new(Mutex::new(PaymentSession::new())),
            task: Mutex::new(None),
        }
    }

    pub fn phase(&self) -> PaymentPhase {
        self.session.lock().unwrap().phase
    }

    pub fn checkout_request_id(&self) -> Option<String> {
        self.session.lock().unwrap().checkout_request_id.clone()
    }

    /// Submits a payment attempt. Returns once the attempt is either rejected
    /// (validation, already in flight, initiation failure) or handed off to
    /// the background confirmation flow. Validation failures never touch the
    /// network and leave the session in `Idle`.
    pub async fn submit(
        &self,
        method: PaymentMethod,
        form: &PaymentForm,
        plan: &SubscriptionPlan,
    ) -> Result<()> {
        if !self.phase().accepts_submission() {
            debug!("submission rejected: payment already in flight");
            return Err(PaymentError::AlreadyInFlight);
        }

        // A retry starts a fresh session; any timers from the previous
        // attempt must be gone before new ones are armed.
        self.clear_task();
        self.session.lock().unwrap().reset();

        match method {
            PaymentMethod::Mpesa => self.submit_mpesa(form, plan).await,
            PaymentMethod::Card | PaymentMethod::Paypal => self.submit_simulated(method, form),
        }
    }

    async fn submit_mpesa(&self, form: &PaymentForm, plan: &SubscriptionPlan) -> Result<()> {
        let phone_number = match phone::normalize_msisdn(&form.phone_number) {
            Ok(msisdn) => msisdn,
            Err(e) => {
                self.ui.toast(ToastKind::Error, phone::INVALID_PHONE_MESSAGE);
                return Err(e);
            }
        };

        self.session.lock().unwrap().transition(PaymentPhase::Submitting);

        let request = StkPushRequest {
            phone_number,
            amount: plan.charge_amount(),
            package_type: plan.tier.to_string(),
        };

        let response = match self.gateway.initiate_stk_push(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Payment error: {}", e);
                let message = match &e {
                    PaymentError::InitiationFailed(server_message) => server_message.clone(),
                    _ => PAYMENT_FAILED_MESSAGE.to_string(),
                };
                self.ui.toast(ToastKind::Error, &message);
                self.session.lock().unwrap().reset();
                return Err(e);
            }
        };

        let started_at = self
            .session
            .lock()
            .unwrap()
            .begin_confirmation(response.checkout_request_id.clone());
        let deadline = started_at + self.config.confirmation_timeout;

        self.ui.toast(ToastKind::Success, STK_SENT_MESSAGE);
        self.spawn_confirmation(response.checkout_request_id, deadline);
        Ok(())
    }

    /// Card and PayPal are a placeholder path: no backend verification, just
    /// a fixed processing delay followed by success. Kept faithful to the
    /// product's current behavior; see DESIGN.md.
    fn submit_simulated(&self, method: PaymentMethod, form: &PaymentForm) -> Result<()> {
        if method == PaymentMethod::Card {
            if form.card_number.trim().is_empty()
                || form.expiry.trim().is_empty()
                || form.cvv.trim().is_empty()
            {
                let message = "Please fill in all card details.";
                self.ui.toast(ToastKind::Error, message);
                return Err(PaymentError::validation(message));
            }
        }

        self.session.lock().unwrap().transition(PaymentPhase::Submitting);

        let ui = Arc::clone(&self.ui);
        let session = Arc::clone(&self.session);
        let token = CancellationToken::new();
        let child = token.clone();
        let processing_delay = self.config.processing_delay;
        let redirect_delay = self.config.redirect_delay;
        let route = self.config.dashboard_route.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = child.cancelled() => return,
                _ = time::sleep(processing_delay) => {}
            }
            session.lock().unwrap().transition(PaymentPhase::Succeeded);
            ui.toast(ToastKind::Success, PAYMENT_SUCCESS_MESSAGE);
            tokio::select! {
                _ = child.cancelled() => {}
                _ = time::sleep(redirect_delay) => ui.navigate(&route),
            }
        });

        self.store_task(ConfirmationTask { token, handle });
        Ok(())
    }

    fn spawn_confirmation(&self, checkout_request_id: String, deadline: Instant) {
        let gateway = Arc::clone(&self.gateway);
        let ui = Arc::clone(&self.ui);
        let session = Arc::clone(&self.session);
        let token = CancellationToken::new();
        let child = token.clone();
        let poll_interval = self.config.poll_interval;
        let redirect_delay = self.config.redirect_delay;
        let route = self.config.dashboard_route.clone();

        let handle = tokio::spawn(async move {
            // First poll fires one interval after initiation, not immediately.
            let mut ticker = time::interval_at(Instant::now() + poll_interval, poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;

                    _ = child.cancelled() => {
                        debug!("confirmation polling cancelled for {}", checkout_request_id);
                        return;
                    }

                    // Hard wall-clock budget from `started_at`; slow or
                    // skipped ticks do not extend it.
                    _ = time::sleep_until(deadline) => {
                        warn!("payment confirmation timed out for {}", checkout_request_id);
                        session.lock().unwrap().transition(PaymentPhase::TimedOut);
                        ui.toast(ToastKind::Error, PAYMENT_TIMEOUT_MESSAGE);
                        return;
                    }

                    _ = ticker.tick() => {
                        let list = match gateway.list_transactions().await {
                            Ok(list) => list,
                            Err(e) => {
                                // Transient query failures must not abort the
                                // session; skip this tick.
                                warn!("Error polling payment status: {}", e);
                                continue;
                            }
                        };

                        // Teardown may have happened while the query was in
                        // flight; a stale tick must not mutate the session.
                        if child.is_cancelled() {
                            return;
                        }

                        let Some(transaction) = list.find(&checkout_request_id) else {
                            debug!("no transaction yet for {}", checkout_request_id);
                            continue;
                        };

                        match transaction.status {
                            TransactionStatus::Pending => {}
                            TransactionStatus::Completed => {
                                info!("payment completed for {}", checkout_request_id);
                                session.lock().unwrap().transition(PaymentPhase::Succeeded);
                                ui.toast(ToastKind::Success, PAYMENT_SUCCESS_MESSAGE);
                                tokio::select! {
                                    _ = child.cancelled() => {}
                                    _ = time::sleep(redirect_delay) => ui.navigate(&route),
                                }
                                return;
                            }
                            TransactionStatus::Failed => {
                                info!("payment failed for {}", checkout_request_id);
                                session.lock().unwrap().transition(PaymentPhase::Failed);
                                ui.toast(ToastKind::Error, PAYMENT_FAILED_MESSAGE);
                                return;
                            }
                        }
                    }
                }
            }
        });

        self.store_task(ConfirmationTask { token, handle });
    }

    fn store_task(&self, task: ConfirmationTask) {
        if let Some(previous) = self.task.lock().unwrap().replace(task) {
            previous.cancel();
        }
    }

    fn clear_task(&self) {
        if let Some(task) = self.task.lock().unwrap().take() {
            task.cancel();
        }
    }

    /// Waits for the active background flow (confirmation polling or the
    /// simulated card path) to reach its end.
    pub async fn wait(&self) {
        let handle = self.task.lock().unwrap().take().map(|t| t.handle);
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    /// Tears the session down, as on navigation away from the checkout page.
    /// Cancels the poll interval and the timeout deterministically and resets
    /// the session to `Idle`.
    pub fn teardown(&self) {
        self.clear_task();
        self.session.lock().unwrap().reset();
    }
}

impl Drop for CheckoutCoordinator {
    fn drop(&mut self) {
        self.clear_task();
    }
}
