use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Location, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// The browser location as `pathname + hash + search`.
///
/// Returns `None` outside a browser or when any part cannot be read.
#[must_use]
pub fn current_location() -> Option<String> {
    window().and_then(|win| location_string(&win.location()))
}

fn location_string(location: &Location) -> Option<String> {
    let path = location.pathname().ok()?;
    let hash = location.hash().ok()?;
    let search = location.search().ok()?;
    Some(format!("{path}{hash}{search}"))
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Perform a fetch request and return the browser `Response`.
///
/// # Errors
/// Returns an error if no window is available, the request fails, or the
/// result is not a `Response`.
#[cfg(target_arch = "wasm32")]
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn fetch_response(url: &str) -> Result<web_sys::Response, JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(win.fetch_with_str(url)).await?;
    resp_value.dyn_into::<web_sys::Response>()
}
