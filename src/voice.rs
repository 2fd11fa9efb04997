//! Browser speech recognition, used by the voice search button.

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::error::TripError;

const RECOGNIZERS: [&str; 2] = ["SpeechRecognition", "webkitSpeechRecognition"];

/// Start one recognition pass. `on_transcript` gets the top transcript of the
/// first result.
pub fn listen_once(on_transcript: impl FnOnce(String) + 'static) -> Result<(), TripError> {
    let window = web_sys::window().ok_or_else(|| TripError::Browser("no window".to_string()))?;

    let constructor: Function = RECOGNIZERS
        .iter()
        .filter_map(|name| Reflect::get(window.as_ref(), &JsValue::from_str(name)).ok())
        .find(|value| value.is_function())
        .ok_or_else(|| {
            TripError::Browser("Voice search is not supported in this browser".to_string())
        })?
        .unchecked_into();

    let recognition = Reflect::construct(&constructor, &Array::new())
        .map_err(|e| TripError::Browser(format!("{:?}", e)))?;

    let onresult = Closure::once_into_js(move |event: JsValue| {
        if let Some(transcript) = first_transcript(&event) {
            tracing::info!("Heard \"{}\"", transcript);
            on_transcript(transcript);
        }
    });
    Reflect::set(&recognition, &JsValue::from_str("onresult"), &onresult)
        .map_err(|e| TripError::Browser(format!("{:?}", e)))?;

    let start: Function = Reflect::get(&recognition, &JsValue::from_str("start"))
        .map_err(|e| TripError::Browser(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|_| TripError::Browser("recognizer has no start()".to_string()))?;
    start
        .call0(&recognition)
        .map_err(|e| TripError::Browser(format!("{:?}", e)))?;
    Ok(())
}

/// `event.results[0][0].transcript`
fn first_transcript(event: &JsValue) -> Option<String> {
    let results = Reflect::get(event, &JsValue::from_str("results")).ok()?;
    let first = Reflect::get_u32(&results, 0).ok()?;
    let alternative = Reflect::get_u32(&first, 0).ok()?;
    Reflect::get(&alternative, &JsValue::from_str("transcript"))
        .ok()?
        .as_string()
}
