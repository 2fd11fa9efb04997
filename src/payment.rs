//! Bindings for the hosted Razorpay checkout widget.
//!
//! The widget script is loaded by `index.html`. The app only hands it an
//! amount and prefill data and relays the opaque payment id it returns.

use js_sys::Reflect;
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use crate::config::AppConfig;
use crate::error::TripError;
use crate::models::BookingDraft;

#[wasm_bindgen]
extern "C" {
    type Razorpay;

    #[wasm_bindgen(constructor, catch)]
    fn new(options: &JsValue) -> Result<Razorpay, JsValue>;

    #[wasm_bindgen(method)]
    fn open(this: &Razorpay);
}

#[derive(Serialize)]
struct Prefill {
    name: String,
    email: String,
    contact: String,
}

#[derive(Serialize)]
struct Theme {
    color: String,
}

#[derive(Serialize)]
struct CheckoutOptions {
    key: String,
    amount: u64,
    currency: String,
    name: String,
    description: String,
    prefill: Prefill,
    theme: Theme,
}

/// The widget takes amounts in the currency's minor unit (paise for INR).
pub fn to_minor_units(amount: f64) -> u64 {
    (amount * 100.0).round().max(0.0) as u64
}

/// Open checkout for `draft`.
///
/// `on_success` receives the payment id from the widget's success handler;
/// `on_dismiss` runs if the user closes the widget without paying.
pub fn open_checkout(
    config: &AppConfig,
    draft: &BookingDraft,
    on_success: impl FnOnce(String) + 'static,
    on_dismiss: impl FnOnce() + 'static,
) -> Result<(), TripError> {
    let options = CheckoutOptions {
        key: config.payment_key.clone(),
        amount: to_minor_units(draft.amount),
        currency: config.currency.clone(),
        name: config.merchant_name.clone(),
        description: config.payment_description.clone(),
        prefill: Prefill {
            name: draft.name.clone(),
            email: draft.email.clone(),
            contact: draft.mobile.clone(),
        },
        theme: Theme {
            color: config.theme_color.clone(),
        },
    };

    let js_options =
        serde_wasm_bindgen::to_value(&options).map_err(|e| TripError::Browser(e.to_string()))?;

    let handler = Closure::once_into_js(move |response: JsValue| {
        let payment_id = Reflect::get(&response, &JsValue::from_str("razorpay_payment_id"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default();
        on_success(payment_id);
    });
    set_property(&js_options, "handler", &handler)?;

    let modal = js_sys::Object::new();
    let ondismiss = Closure::once_into_js(on_dismiss);
    set_property(&modal, "ondismiss", &ondismiss)?;
    set_property(&js_options, "modal", &modal)?;

    let widget = Razorpay::new(&js_options)
        .map_err(|e| TripError::Browser(format!("payment widget unavailable: {:?}", e)))?;
    widget.open();
    tracing::info!("Opened checkout for {} {}", options.amount, options.currency);
    Ok(())
}

fn set_property(target: &JsValue, key: &str, value: &JsValue) -> Result<(), TripError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| TripError::Browser(format!("{:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units_rounds_to_paise() {
        assert_eq!(to_minor_units(4999.0), 499_900);
        assert_eq!(to_minor_units(1250.5), 125_050);
        assert_eq!(to_minor_units(-3.0), 0);
        assert_eq!(to_minor_units(0.1 + 0.2), 30);
    }
}
