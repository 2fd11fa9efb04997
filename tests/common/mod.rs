#![allow(dead_code)]

use std::cell::RefCell;

use async_trait::async_trait;

use trip_planner::gateway::Gateway;
use trip_planner::models::{
    BookedPackage, BookingDraft, Credentials, LoginResponse, MessageBody, Package, PaymentRecord,
    Place, Registration, ReviewDraft,
};
use trip_planner::TripError;

/// In-memory gateway that records every call in order and answers from
/// canned results.
#[derive(Default)]
pub struct RecordingGateway {
    pub calls: RefCell<Vec<&'static str>>,
    pub payments: RefCell<Vec<PaymentRecord>>,
    pub bookings: RefCell<Vec<BookingDraft>>,
    pub reviews: RefCell<Vec<ReviewDraft>>,
    pub login_result: RefCell<Option<Result<LoginResponse, TripError>>>,
    pub payment_error: RefCell<Option<TripError>>,
    pub booking_error: RefCell<Option<TripError>>,
    pub review_error: RefCell<Option<TripError>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl Gateway for RecordingGateway {
    async fn places(&self) -> Result<Vec<Place>, TripError> {
        self.record("places");
        Ok(vec![])
    }

    async fn packages(&self, _place: &str) -> Result<Vec<Package>, TripError> {
        self.record("packages");
        Ok(vec![])
    }

    async fn booked(&self, _customer_name: &str) -> Result<Vec<BookedPackage>, TripError> {
        self.record("booked");
        Ok(vec![])
    }

    async fn login(&self, _credentials: &Credentials) -> Result<LoginResponse, TripError> {
        self.record("login");
        self.login_result
            .borrow()
            .clone()
            .unwrap_or_else(|| Err(TripError::Http { status: 500 }))
    }

    async fn register(&self, _registration: &Registration) -> Result<MessageBody, TripError> {
        self.record("register");
        Ok(MessageBody::default())
    }

    async fn save_payment(&self, record: &PaymentRecord) -> Result<(), TripError> {
        self.record("payment");
        if let Some(err) = self.payment_error.borrow().clone() {
            return Err(err);
        }
        self.payments.borrow_mut().push(record.clone());
        Ok(())
    }

    async fn save_booking(&self, draft: &BookingDraft) -> Result<(), TripError> {
        self.record("booking");
        if let Some(err) = self.booking_error.borrow().clone() {
            return Err(err);
        }
        self.bookings.borrow_mut().push(draft.clone());
        Ok(())
    }

    async fn submit_review(&self, review: &ReviewDraft) -> Result<(), TripError> {
        self.record("review");
        if let Some(err) = self.review_error.borrow().clone() {
            return Err(err);
        }
        self.reviews.borrow_mut().push(review.clone());
        Ok(())
    }
}

pub fn package(title: &str, price: f64) -> Package {
    Package {
        title: title.to_string(),
        price,
        duration: "3 days / 2 nights".to_string(),
        image_url: "https://img.example.com/pkg.jpg".to_string(),
        features: vec!["Sightseeing".to_string(), "Hotel stay".to_string()],
    }
}
