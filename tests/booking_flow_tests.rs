mod common;

use common::{package, RecordingGateway};
use trip_planner::booking::{BookingFlow, BookingForm, BookingState, SubmitError};
use trip_planner::TripError;

fn confirmed_flow(price: f64, count: u32) -> (BookingForm, BookingFlow) {
    let mut form = BookingForm::new(package("Ooty Hill Escape", price));
    form.mobile = "9876543210".to_string();
    form.email = "asha@example.com".to_string();
    form.set_count(count);

    let mut flow = BookingFlow::new();
    flow.begin_payment(form.draft("Asha")).expect("payment should open");
    flow.confirm_payment("pay_abc123").expect("payment should confirm");
    (form, flow)
}

#[test]
fn test_finalize_posts_payment_then_booking() {
    let gateway = RecordingGateway::new();
    let (_, mut flow) = confirmed_flow(4999.0, 2);

    let draft = pollster::block_on(flow.finalize(&gateway)).expect("finalize should succeed");

    assert_eq!(gateway.calls(), vec!["payment", "booking"]);
    assert_eq!(draft.amount, 9998.0);

    let payments = gateway.payments.borrow();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].payment_id, "pay_abc123");
    assert_eq!(payments[0].amount, 9998.0);
    assert_eq!(payments[0].package_title, "Ooty Hill Escape");

    let bookings = gateway.bookings.borrow();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].count, 2);
    assert_eq!(bookings[0].name, "Asha");

    assert!(matches!(flow.state(), BookingState::Submitted { .. }));
}

#[test]
fn test_failed_payment_skips_booking() {
    let gateway = RecordingGateway::new();
    *gateway.payment_error.borrow_mut() = Some(TripError::Http { status: 500 });
    let (_, mut flow) = confirmed_flow(1500.0, 1);

    let err = pollster::block_on(flow.finalize(&gateway)).unwrap_err();

    assert_eq!(err, SubmitError::Payment(TripError::Http { status: 500 }));
    assert_eq!(gateway.calls(), vec!["payment"]);
    assert!(gateway.bookings.borrow().is_empty());
    assert!(matches!(flow.state(), BookingState::PaymentConfirmed { .. }));
}

#[test]
fn test_failed_booking_keeps_recorded_payment() {
    let gateway = RecordingGateway::new();
    *gateway.booking_error.borrow_mut() = Some(TripError::Api {
        status: 400,
        message: "Mobile is required".to_string(),
    });
    let (_, mut flow) = confirmed_flow(1500.0, 1);

    let err = pollster::block_on(flow.finalize(&gateway)).unwrap_err();

    assert_eq!(
        err.to_string(),
        "An error occurred while submitting the form: Mobile is required"
    );
    assert_eq!(gateway.calls(), vec!["payment", "booking"]);
    assert_eq!(gateway.payments.borrow().len(), 1);
    assert!(matches!(flow.state(), BookingState::PaymentConfirmed { .. }));
}

#[test]
fn test_finalize_can_be_retried_after_failure() {
    let gateway = RecordingGateway::new();
    *gateway.booking_error.borrow_mut() = Some(TripError::Network("offline".to_string()));
    let (_, mut flow) = confirmed_flow(800.0, 3);

    assert!(pollster::block_on(flow.finalize(&gateway)).is_err());
    *gateway.booking_error.borrow_mut() = None;
    assert!(pollster::block_on(flow.finalize(&gateway)).is_ok());

    assert_eq!(gateway.calls(), vec!["payment", "booking", "payment", "booking"]);
    assert_eq!(gateway.bookings.borrow().len(), 1);
}

#[test]
fn test_finalize_without_confirmed_payment_makes_no_calls() {
    let gateway = RecordingGateway::new();
    let mut flow = BookingFlow::new();

    let err = pollster::block_on(flow.finalize(&gateway)).unwrap_err();

    assert!(matches!(err, SubmitError::Flow(TripError::InvalidTransition { .. })));
    assert!(gateway.calls().is_empty());
}

#[test]
fn test_amount_follows_count_changes_until_payment() {
    let mut form = BookingForm::new(package("Madurai Temple Tour", 1200.0));
    for count in 1..=5u32 {
        form.set_count(count);
        assert_eq!(form.amount(), 1200.0 * count as f64);
        assert_eq!(form.draft("Asha").amount, form.amount());
    }
}

#[test]
fn test_new_booking_can_start_after_submission() {
    let gateway = RecordingGateway::new();
    let (form, mut flow) = confirmed_flow(999.0, 1);
    pollster::block_on(flow.finalize(&gateway)).unwrap();

    flow.begin_payment(form.draft("Asha")).expect("a new booking should start");
    assert!(matches!(flow.state(), BookingState::AwaitingPayment { .. }));
}
