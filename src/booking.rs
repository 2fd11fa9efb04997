//! Booking flow.
//!
//! A booking moves through four states:
//!
//! ```text
//! Idle --begin_payment--> AwaitingPayment --confirm_payment--> PaymentConfirmed --finalize--> Submitted
//!                              |
//!                              +--dismiss--> Idle
//! ```
//!
//! `finalize` posts the payment record and then the booking record. A
//! failure in either leaves the flow in `PaymentConfirmed`; a recorded
//! payment is never rolled back.

use thiserror::Error;
use tracing::{info, warn};

use crate::error::TripError;
use crate::gateway::Gateway;
use crate::models::{BookingDraft, Package, PaymentRecord};

/// Editable booking form for one handed-off package.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingForm {
    pub package: Package,
    pub mobile: String,
    pub email: String,
    count: u32,
    count_input: String,
}

impl BookingForm {
    pub fn new(package: Package) -> Self {
        Self {
            package,
            mobile: String::new(),
            email: String::new(),
            count: 1,
            count_input: "1".to_string(),
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn set_count(&mut self, count: u32) {
        self.count = count.max(1);
        self.count_input = self.count.to_string();
    }

    /// Text shown in the count field. May be empty while the user edits it.
    pub fn count_input(&self) -> &str {
        &self.count_input
    }

    /// Take the raw count text as typed. Anything below 1 or unparseable
    /// counts as 1, but the text itself is kept so the field can be cleared.
    pub fn set_count_input(&mut self, raw: &str) {
        let count = raw.trim().parse::<i64>().unwrap_or(1).clamp(1, u32::MAX as i64);
        self.count = count as u32;
        self.count_input = raw.to_string();
    }

    /// Running total, always `price * count`.
    pub fn amount(&self) -> f64 {
        self.package.price * self.count as f64
    }

    pub fn draft(&self, customer_name: &str) -> BookingDraft {
        BookingDraft {
            name: customer_name.to_string(),
            mobile: self.mobile.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            package_title: self.package.title.clone(),
            count: self.count,
            amount: self.amount(),
        }
    }

    /// Clear the customer fields after a completed booking.
    pub fn reset(&mut self) {
        self.mobile.clear();
        self.email.clear();
        self.set_count(1);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum BookingState {
    #[default]
    Idle,
    AwaitingPayment {
        draft: BookingDraft,
    },
    PaymentConfirmed {
        draft: BookingDraft,
        payment_id: String,
    },
    Submitted {
        draft: BookingDraft,
        payment_id: String,
    },
}

impl BookingState {
    pub fn name(&self) -> &'static str {
        match self {
            BookingState::Idle => "idle",
            BookingState::AwaitingPayment { .. } => "awaiting payment",
            BookingState::PaymentConfirmed { .. } => "payment confirmed",
            BookingState::Submitted { .. } => "submitted",
        }
    }
}

/// Failure of `finalize`, tagged with the call that failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("Failed to store payment details: {0}")]
    Payment(TripError),

    #[error("An error occurred while submitting the form: {0}")]
    Booking(TripError),

    #[error(transparent)]
    Flow(TripError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFlow {
    state: BookingState,
}

impl BookingFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    fn reject(&self, event: &'static str) -> TripError {
        warn!("Rejected {} while {}", event, self.state.name());
        TripError::InvalidTransition {
            event,
            state: self.state.name(),
        }
    }

    /// Open the payment widget for `draft`.
    ///
    /// Allowed from `Idle`, or from `Submitted` to start another booking.
    pub fn begin_payment(&mut self, draft: BookingDraft) -> Result<(), TripError> {
        if !matches!(self.state, BookingState::Idle | BookingState::Submitted { .. }) {
            return Err(self.reject("begin payment"));
        }
        if !draft.amount.is_finite() || draft.amount <= 0.0 || draft.count == 0 {
            self.state = BookingState::Idle;
            return Err(TripError::InvalidAmount);
        }
        info!("Awaiting payment of {} for {}", draft.amount, draft.package_title);
        self.state = BookingState::AwaitingPayment { draft };
        Ok(())
    }

    /// Widget success callback. Only accepted while awaiting payment.
    ///
    /// A callback without a payment id drops back to `Idle`; nothing is
    /// recorded for it.
    pub fn confirm_payment(&mut self, payment_id: &str) -> Result<(), TripError> {
        let payment_id = payment_id.trim();
        match std::mem::take(&mut self.state) {
            BookingState::AwaitingPayment { .. } if payment_id.is_empty() => {
                warn!("Payment widget reported success without a payment id");
                Err(TripError::Browser(
                    "payment widget returned no payment id".to_string(),
                ))
            }
            BookingState::AwaitingPayment { draft } => {
                info!("Payment {} confirmed", payment_id);
                self.state = BookingState::PaymentConfirmed {
                    draft,
                    payment_id: payment_id.to_string(),
                };
                Ok(())
            }
            other => {
                self.state = other;
                Err(self.reject("confirm payment"))
            }
        }
    }

    /// Widget closed without paying.
    pub fn dismiss(&mut self) -> Result<(), TripError> {
        match self.state {
            BookingState::AwaitingPayment { .. } => {
                info!("Payment widget dismissed");
                self.state = BookingState::Idle;
                Ok(())
            }
            _ => Err(self.reject("dismiss payment")),
        }
    }

    /// Persist the payment record, then the booking record.
    ///
    /// The booking call is only made once the payment call succeeded.
    pub async fn finalize<G>(&mut self, gateway: &G) -> Result<BookingDraft, SubmitError>
    where
        G: Gateway + ?Sized,
    {
        let (draft, payment_id) = match &self.state {
            BookingState::PaymentConfirmed { draft, payment_id } => {
                (draft.clone(), payment_id.clone())
            }
            _ => return Err(SubmitError::Flow(self.reject("submit booking"))),
        };

        let record = PaymentRecord {
            name: draft.name.clone(),
            mobile: draft.mobile.clone(),
            email: draft.email.clone(),
            package_title: draft.package_title.clone(),
            payment_id: payment_id.clone(),
            amount: draft.amount,
        };

        gateway.save_payment(&record).await.map_err(|e| {
            warn!("Storing payment {} failed: {}", payment_id, e);
            SubmitError::Payment(e)
        })?;
        info!("Payment {} stored", payment_id);

        gateway.save_booking(&draft).await.map_err(|e| {
            warn!("Payment {} stored but booking failed: {}", payment_id, e);
            SubmitError::Booking(e)
        })?;
        info!("Booking stored for {}", draft.name);

        self.state = BookingState::Submitted {
            draft: draft.clone(),
            payment_id,
        };
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(price: f64) -> Package {
        Package {
            title: "Hill Escape".to_string(),
            price,
            duration: "3 days".to_string(),
            image_url: String::new(),
            features: vec![],
        }
    }

    #[test]
    fn test_amount_tracks_price_and_count() {
        let mut form = BookingForm::new(package(2500.0));
        assert_eq!(form.amount(), 2500.0);

        form.set_count(3);
        assert_eq!(form.amount(), 7500.0);

        form.package.price = 1000.0;
        assert_eq!(form.amount(), 3000.0);
    }

    #[test]
    fn test_count_input_clamps_to_one() {
        let mut form = BookingForm::new(package(100.0));
        for raw in ["0", "-4", "", "abc"] {
            form.set_count_input(raw);
            assert_eq!(form.count(), 1, "input {:?}", raw);
            assert_eq!(form.amount(), 100.0);
        }
        form.set_count_input(" 4 ");
        assert_eq!(form.count(), 4);
        assert_eq!(form.amount(), 400.0);
    }

    #[test]
    fn test_count_field_can_be_cleared_and_retyped() {
        let mut form = BookingForm::new(package(1000.0));
        form.set_count_input("");
        assert_eq!(form.count_input(), "");
        assert_eq!(form.count(), 1);

        let typed = format!("{}3", form.count_input());
        form.set_count_input(&typed);
        assert_eq!(form.count(), 3);
        assert_eq!(form.amount(), 3000.0);
        assert_eq!(form.count_input(), "3");
    }

    #[test]
    fn test_reset_restores_count_text() {
        let mut form = BookingForm::new(package(10.0));
        form.set_count_input("");
        form.reset();
        assert_eq!(form.count_input(), "1");
    }

    #[test]
    fn test_confirm_without_payment_id_returns_to_idle() {
        let mut flow = BookingFlow::new();
        flow.begin_payment(BookingForm::new(package(500.0)).draft("Asha")).unwrap();

        let err = flow.confirm_payment("  ").unwrap_err();
        assert!(matches!(err, TripError::Browser(_)), "got {:?}", err);
        assert_eq!(flow.state(), &BookingState::Idle);
    }

    #[test]
    fn test_draft_carries_amount_and_title() {
        let mut form = BookingForm::new(package(1200.0));
        form.mobile = " 9000000000 ".to_string();
        form.email = "Asha@Example.com".to_string();
        form.set_count(2);

        let draft = form.draft("Asha");
        assert_eq!(draft.amount, 2400.0);
        assert_eq!(draft.count, 2);
        assert_eq!(draft.package_title, "Hill Escape");
        assert_eq!(draft.mobile, "9000000000");
        assert_eq!(draft.email, "asha@example.com");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = BookingForm::new(package(10.0));
        form.mobile = "1".to_string();
        form.email = "a@b.c".to_string();
        form.set_count(5);
        form.reset();
        assert!(form.mobile.is_empty());
        assert!(form.email.is_empty());
        assert_eq!(form.count(), 1);
    }

    #[test]
    fn test_begin_payment_rejects_non_positive_amount() {
        let mut flow = BookingFlow::new();
        let draft = BookingForm::new(package(0.0)).draft("Asha");
        assert_eq!(flow.begin_payment(draft), Err(TripError::InvalidAmount));
        assert_eq!(flow.state(), &BookingState::Idle);

        let draft = BookingForm::new(package(f64::NAN)).draft("Asha");
        assert_eq!(flow.begin_payment(draft), Err(TripError::InvalidAmount));
        assert_eq!(flow.state(), &BookingState::Idle);
    }

    #[test]
    fn test_confirm_outside_awaiting_is_rejected() {
        let mut flow = BookingFlow::new();
        let err = flow.confirm_payment("pay_1").unwrap_err();
        assert!(matches!(err, TripError::InvalidTransition { state: "idle", .. }));
        assert_eq!(flow.state(), &BookingState::Idle);
    }

    #[test]
    fn test_second_confirm_is_rejected() {
        let mut flow = BookingFlow::new();
        flow.begin_payment(BookingForm::new(package(500.0)).draft("Asha")).unwrap();
        flow.confirm_payment("pay_1").unwrap();

        assert!(flow.confirm_payment("pay_2").is_err());
        match flow.state() {
            BookingState::PaymentConfirmed { payment_id, .. } => assert_eq!(payment_id, "pay_1"),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_begin_while_awaiting_is_rejected() {
        let mut flow = BookingFlow::new();
        let draft = BookingForm::new(package(500.0)).draft("Asha");
        flow.begin_payment(draft.clone()).unwrap();
        assert!(flow.begin_payment(draft).is_err());
        assert_eq!(flow.state().name(), "awaiting payment");
    }

    #[test]
    fn test_dismiss_returns_to_idle() {
        let mut flow = BookingFlow::new();
        flow.begin_payment(BookingForm::new(package(500.0)).draft("Asha")).unwrap();
        flow.dismiss().unwrap();
        assert_eq!(flow.state(), &BookingState::Idle);
        assert!(flow.dismiss().is_err());
    }
}
