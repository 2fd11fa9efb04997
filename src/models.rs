use serde::{Deserialize, Serialize};

// -- Catalog types matching backend documents --

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Place {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
}

/// A purchasable itinerary. Handed unchanged from the listing page to the
/// booking page.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub features: Vec<String>,
}

// -- Booked view (read-only projection owned by the backend) --

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedPackage {
    pub customer: Customer,
    pub package_details: PackageDetails,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetails {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub features: Vec<String>,
}

// -- Outbound payloads --

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub package_title: String,
    pub count: u32,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub package_title: String,
    pub payment_id: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub place_id: String,
    pub user_id: String,
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

// -- Auth responses --

/// Login response. The role is taken as an opaque claim from the server.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default)]
    pub role: Option<String>,
}

impl LoginResponse {
    pub fn admin_claim(&self) -> bool {
        self.is_admin
            .unwrap_or_else(|| self.role.as_deref() == Some("admin"))
    }
}

/// Generic `{ "message": ... }` acknowledgement or error body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}
