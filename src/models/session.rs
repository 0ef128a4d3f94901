// src/models/session.rs
use tokio::time::Instant;
use tracing::{debug, warn};

/// Client-side checkout lifecycle. Transitions are strictly ordered:
/// `Idle -> Submitting -> AwaitingConfirmation -> terminal`; the card/paypal
/// path goes straight from `Submitting` to a terminal phase. A terminal phase
/// is never left except by resetting the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentPhase {
    Idle,
    Submitting,
    AwaitingConfirmation,
    Succeeded,
    Failed,
    TimedOut,
}

impl PaymentPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PaymentPhase::Succeeded | PaymentPhase::Failed | PaymentPhase::TimedOut
        )
    }

    /// Whether a new submission may start from this phase. Terminal phases
    /// allow retry; only an in-flight attempt blocks.
    pub fn accepts_submission(&self) -> bool {
        !matches!(
            self,
            PaymentPhase::Submitting | PaymentPhase::AwaitingConfirmation
        )
    }
}

/// Ephemeral per-attempt state. Created fresh on each submission and reset on
/// teardown, retry, or terminal resolution.
#[derive(Debug)]
pub struct PaymentSession {
    pub phase: PaymentPhase,
    pub checkout_request_id: Option<String>,
    pub started_at: Option<Instant>,
}

impl PaymentSession {
    pub fn new() -> Self {
        PaymentSession {
            phase: PaymentPhase::Idle,
            checkout_request_id: None,
            started_at: None,
        }
    }

    /// Applies a phase transition, refusing to leave a terminal phase.
    pub fn transition(&mut self, next: PaymentPhase) {
        if self.phase.is_terminal() && next != PaymentPhase::Idle {
            warn!(from = ?self.phase, to = ?next, "ignoring transition out of terminal phase");
            return;
        }
        debug!(from = ?self.phase, to = ?next, "payment phase transition");
        self.phase = next;
    }

    /// Enters `AwaitingConfirmation` for the given checkout request and
    /// returns the recorded start instant the timeout deadline is computed
    /// from.
    pub fn begin_confirmation(&mut self, checkout_request_id: String) -> Instant {
        let started_at = Instant::now();
        self.checkout_request_id = Some(checkout_request_id);
        self.started_at = Some(started_at);
        self.transition(PaymentPhase::AwaitingConfirmation);
        started_at
    }

    pub fn reset(&mut self) {
        self.phase = PaymentPhase::Idle;
        self.checkout_request_id = None;
        self.started_at = None;
    }
}

impl Default for PaymentSession {
    fn default() -> Self {
        Self::new()
    }
}
