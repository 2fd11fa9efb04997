use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "https://tripplanner-1.onrender.com";
const DEFAULT_PAYMENT_KEY: &str = "rzp_test_4rdgre6savrrmw";

/// Application settings, fixed at build time.
///
/// `TRIP_API_BASE_URL` and `TRIP_PAYMENT_KEY` override the defaults when set
/// in the environment of the build.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub payment_key: String,
    pub currency: String,
    pub merchant_name: String,
    pub payment_description: String,
    pub theme_color: String,
    pub toast_duration: Duration,
    pub redirect_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            payment_key: DEFAULT_PAYMENT_KEY.to_string(),
            currency: "INR".to_string(),
            merchant_name: "Travigo".to_string(),
            payment_description: "Trip package booking".to_string(),
            theme_color: "#3399cc".to_string(),
            toast_duration: Duration::from_secs(3),
            redirect_delay: Duration::from_secs(2),
        }
    }
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::with_overrides(option_env!("TRIP_API_BASE_URL"), option_env!("TRIP_PAYMENT_KEY"))
    }

    fn with_overrides(base_url: Option<&str>, payment_key: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = base_url.map(str::trim).filter(|s| !s.is_empty()) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(key) = payment_key.map(str::trim).filter(|s| !s.is_empty()) {
            config.payment_key = key.to_string();
        }
        config
    }
}
