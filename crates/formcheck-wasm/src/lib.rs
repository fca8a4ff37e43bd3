//! formcheck WASM
//!
//! WebAssembly bindings for validating live page forms.
//!
//! # Example (JavaScript)
//! ```javascript
//! form.addEventListener('submit', (event) => {
//!     const ok = validate(form, {
//!         fieldErrorClass: 'FormField-error',
//!         messageErrorClass: 'ErrorMessage',
//!         fields: {
//!             'user-name': {
//!                 rules: { maxLength: 20, minLength: 1 },
//!                 message: 'Please enter a valid username.'
//!             },
//!             'user-confirm': {
//!                 rules: { equals: passwordInput.value },
//!                 message: 'Passwords must match.'
//!             }
//!         }
//!     });
//!     if (!ok) event.preventDefault();
//! });
//! ```

use formcheck::{FormConfig, Reconciler};
use wasm_bindgen::prelude::*;
use web_sys::HtmlFormElement;

pub mod web_form;

pub use web_form::WebForm;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn parse_config(config: JsValue) -> Result<FormConfig, JsValue> {
    let config: FormConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?;
    config
        .check(&formcheck::RuleRegistry::new())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config)
}

/// Validate a form and update its error annotations
///
/// Returns `true` when every field passes. An unknown rule name or unusable
/// rule parameter is thrown as an error.
#[wasm_bindgen(js_name = validate)]
pub fn validate_form(form: HtmlFormElement, config: JsValue) -> Result<bool, JsValue> {
    let config = parse_config(config)?;
    let mut form = WebForm::new(form);

    Reconciler::new()
        .validate(&mut form, &config)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Validate the first form matching a CSS selector
#[wasm_bindgen(js_name = validateSelector)]
pub fn validate_selector(selector: &str, config: JsValue) -> Result<bool, JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?;

    let form = document
        .query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("no element matches '{}'", selector)))?
        .dyn_into::<HtmlFormElement>()
        .map_err(|_| JsValue::from_str(&format!("'{}' is not a form", selector)))?;

    validate_form(form, config)
}

/// Evaluate the rules without touching the page
///
/// Returns an object mapping field names to messages.
#[wasm_bindgen(js_name = collectErrors)]
pub fn collect_errors(form: HtmlFormElement, config: JsValue) -> Result<JsValue, JsValue> {
    let config = parse_config(config)?;
    let form = WebForm::new(form);

    let errors = Reconciler::new()
        .evaluate(&form, &config)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    serde::Serialize::serialize(&errors.into_inner(), &serializer)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize errors: {}", e)))
}

/// Quick email validation
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    formcheck::rules::is_valid_email(email)
}

/// Quick `MM/DD/YYYY` date validation
#[wasm_bindgen(js_name = isValidDate)]
pub fn is_valid_date_js(date: &str) -> bool {
    formcheck::rules::is_valid_date(date)
}
