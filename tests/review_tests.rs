mod common;

use common::RecordingGateway;
use trip_planner::review::{submit_review, ReviewForm};
use trip_planner::TripError;

#[test]
fn test_submitted_review_reports_package_id() {
    let gateway = RecordingGateway::new();
    let mut form = ReviewForm::new("pkg-42", "Asha");
    form.rating = 5;
    form.comment = "Great guide and hotel".to_string();

    let package_id = pollster::block_on(submit_review(&gateway, &form)).unwrap();

    assert_eq!(package_id, "pkg-42");
    let reviews = gateway.reviews.borrow();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].user_id, "Asha");
    assert_eq!(reviews[0].rating, 5);
}

#[test]
fn test_invalid_review_is_not_sent() {
    let gateway = RecordingGateway::new();
    let form = ReviewForm::new("pkg-42", "Asha");

    let err = pollster::block_on(submit_review(&gateway, &form)).unwrap_err();

    assert!(matches!(err, TripError::Validation(_)));
    assert!(gateway.calls().is_empty());
}

#[test]
fn test_server_failure_surfaces_error() {
    let gateway = RecordingGateway::new();
    *gateway.review_error.borrow_mut() = Some(TripError::Http { status: 503 });
    let mut form = ReviewForm::new("pkg-42", "Asha");
    form.comment = "Nice".to_string();

    let err = pollster::block_on(submit_review(&gateway, &form)).unwrap_err();

    assert_eq!(err, TripError::Http { status: 503 });
}
