//! Remote data gateway.
//!
//! Every call the client makes to the trip planner backend goes through
//! [`Gateway`]. The browser implementation uses `web-sys` fetch; flows
//! above it take the trait so they can run against an in-memory fake.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::TripError;
use crate::models::{
    BookedPackage, BookingDraft, Credentials, LoginResponse, MessageBody, Package, PaymentRecord,
    Place, Registration, ReviewDraft,
};

#[async_trait(?Send)]
pub trait Gateway {
    async fn places(&self) -> Result<Vec<Place>, TripError>;

    /// Packages offered at a place. A 404 means the place has none.
    async fn packages(&self, place: &str) -> Result<Vec<Package>, TripError>;

    async fn booked(&self, customer_name: &str) -> Result<Vec<BookedPackage>, TripError>;

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, TripError>;

    async fn register(&self, registration: &Registration) -> Result<MessageBody, TripError>;

    async fn save_payment(&self, record: &PaymentRecord) -> Result<(), TripError>;

    async fn save_booking(&self, draft: &BookingDraft) -> Result<(), TripError>;

    async fn submit_review(&self, review: &ReviewDraft) -> Result<(), TripError>;
}

/// Fetch-backed gateway rooted at a single base URL.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, TripError> {
        let (status, body) = self.send("GET", path, None).await?;
        decode_response(status, &body)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<T, TripError> {
        let json = serde_json::to_string(payload).map_err(|e| TripError::Decode(e.to_string()))?;
        let (status, body) = self.send("POST", path, Some(json)).await?;
        decode_response(status, &body)
    }

    /// Issue one request and return the status with the raw body text.
    async fn send(
        &self,
        method: &str,
        path: &str,
        json_body: Option<String>,
    ) -> Result<(u16, String), TripError> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;
        use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

        let url = self.url(path);
        debug!("{} {}", method, url);

        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        if let Some(json) = json_body {
            let headers = Headers::new().map_err(|e| TripError::Browser(format!("{:?}", e)))?;
            headers
                .set("Content-Type", "application/json")
                .map_err(|e| TripError::Browser(format!("{:?}", e)))?;
            opts.set_headers(&headers);
            opts.set_body(&wasm_bindgen::JsValue::from_str(&json));
        }

        let request = Request::new_with_str_and_init(&url, &opts)
            .map_err(|e| TripError::Network(format!("request error: {:?}", e)))?;

        let window = web_sys::window().ok_or_else(|| TripError::Browser("no window".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| {
                warn!("{} {} failed: {:?}", method, url, e);
                TripError::Network(format!("fetch error: {:?}", e))
            })?;

        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| TripError::Browser("response is not a Response".to_string()))?;

        let text = JsFuture::from(
            resp.text()
                .map_err(|e| TripError::Decode(format!("text promise error: {:?}", e)))?,
        )
        .await
        .map_err(|e| TripError::Decode(format!("text error: {:?}", e)))?;

        let status = resp.status();
        info!("{} {} -> {}", method, url, status);
        Ok((status, text.as_string().unwrap_or_default()))
    }
}

/// Turn a status and body into a typed result.
///
/// Non-success statuses surface the server's `message` when present.
/// Empty success bodies decode as JSON `null`, so unit and `Option` targets
/// accept acknowledgements without content.
fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, TripError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<MessageBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty());
        return Err(match message {
            Some(message) => TripError::Api { status, message },
            None => TripError::Http { status },
        });
    }

    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| TripError::Decode(e.to_string()))
}

/// Package listing response. The backend answers 404 for a place with no
/// packages, which reads as an empty list.
fn packages_from(status: u16, body: &str) -> Result<Vec<Package>, TripError> {
    match decode_response::<Option<Vec<Package>>>(status, body) {
        Ok(packages) => Ok(packages.unwrap_or_default()),
        Err(e) if e.status() == Some(404) => {
            info!("No packages listed");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// Path segments and query values are percent-encoded before use.
fn encode(segment: &str) -> String {
    String::from(js_sys::encode_uri_component(segment))
}

#[async_trait(?Send)]
impl Gateway for HttpGateway {
    async fn places(&self) -> Result<Vec<Place>, TripError> {
        let places: Option<Vec<Place>> = self.get("/api/places").await?;
        Ok(places.unwrap_or_default())
    }

    async fn packages(&self, place: &str) -> Result<Vec<Package>, TripError> {
        let path = format!("/api/packages?place={}", encode(place));
        let (status, body) = self.send("GET", &path, None).await?;
        packages_from(status, &body)
    }

    async fn booked(&self, customer_name: &str) -> Result<Vec<BookedPackage>, TripError> {
        let path = format!("/api/booked/{}", encode(customer_name));
        let booked: Option<Vec<BookedPackage>> = self.get(&path).await?;
        Ok(booked.unwrap_or_default())
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, TripError> {
        let response: Option<LoginResponse> = self.post("/api/auth/login", credentials).await?;
        Ok(response.unwrap_or_default())
    }

    async fn register(&self, registration: &Registration) -> Result<MessageBody, TripError> {
        let response: Option<MessageBody> = self.post("/api/auth/register", registration).await?;
        Ok(response.unwrap_or_default())
    }

    async fn save_payment(&self, record: &PaymentRecord) -> Result<(), TripError> {
        self.post::<_, serde_json::Value>("/payment", record).await.map(|_| ())
    }

    async fn save_booking(&self, draft: &BookingDraft) -> Result<(), TripError> {
        self.post::<_, serde_json::Value>("/customer", draft).await.map(|_| ())
    }

    async fn submit_review(&self, review: &ReviewDraft) -> Result<(), TripError> {
        self.post::<_, serde_json::Value>("/api/reviews", review).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let gateway = HttpGateway::new("https://api.example.com/");
        assert_eq!(gateway.url("/api/places"), "https://api.example.com/api/places");
    }

    #[test]
    fn test_error_body_message_is_surfaced() {
        let err = decode_response::<serde_json::Value>(401, r#"{"message":"Invalid password"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            TripError::Api {
                status: 401,
                message: "Invalid password".to_string()
            }
        );
    }

    #[test]
    fn test_error_without_body_is_plain_http() {
        let err = decode_response::<serde_json::Value>(500, "Internal Server Error").unwrap_err();
        assert_eq!(err, TripError::Http { status: 500 });
        assert_eq!(err.to_string(), "HTTP error! Status: 500");
    }

    #[test]
    fn test_packages_not_found_is_empty_list() {
        assert!(packages_from(404, "").unwrap().is_empty());
        let packages = packages_from(404, r#"{"message":"No packages found"}"#).unwrap();
        assert!(packages.is_empty());
    }

    #[test]
    fn test_packages_server_error_is_surfaced() {
        let err = packages_from(500, "").unwrap_err();
        assert_eq!(err, TripError::Http { status: 500 });
    }

    #[test]
    fn test_packages_decodes_listing() {
        let packages = packages_from(200, r#"[{"title":"Hill Escape","price":4999}]"#).unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].title, "Hill Escape");
        assert!(packages_from(200, "").unwrap().is_empty());
    }

    #[test]
    fn test_empty_success_body_decodes_as_none() {
        let value: Option<Vec<Place>> = decode_response(200, "").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_malformed_success_body_is_decode_error() {
        let err = decode_response::<Vec<Place>>(200, "{not json").unwrap_err();
        assert!(matches!(err, TripError::Decode(_)), "got {:?}", err);
    }
}
