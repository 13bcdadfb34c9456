//! Small browser helpers: clock, clipboard, confirm dialog.
//!
//! Each call no-ops (or returns a neutral value) outside the hydrated
//! browser build so SSR stays deterministic.

/// Current time as an ISO-8601 string (empty on the server).
pub fn now_iso() -> String {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}

/// Write `text` to the system clipboard, resolving once the browser has
/// accepted or refused the write.
///
/// # Errors
///
/// Returns a display string if there is no clipboard or the write is denied.
#[cfg_attr(not(feature = "hydrate"), allow(clippy::unused_async))]
pub async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let clipboard = web_sys::window()
            .and_then(|w| w.navigator().clipboard())
            .ok_or_else(|| "clipboard unavailable".to_owned())?;
        wasm_bindgen_futures::JsFuture::from(clipboard.write_text(text))
            .await
            .map(|_| ())
            .map_err(|e| {
                js_sys::Reflect::get(&e, &wasm_bindgen::JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
                    .unwrap_or_else(|| "clipboard write denied".to_owned())
            })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = text;
        Err("clipboard unavailable on server".to_owned())
    }
}

/// Blocking yes/no dialog. Always `false` on the server.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
        false
    }
}
