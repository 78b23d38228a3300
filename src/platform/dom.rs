//! DOM side effects: counter text, celebration message, share link

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::error::ShareError;

// JS binding for the async clipboard API
#[wasm_bindgen(inline_js = "
    export function write_clipboard(text) {
        return navigator.clipboard.writeText(text);
    }
")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn write_clipboard(text: &str) -> Result<js_sys::Promise, JsValue>;
}

fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

/// Show "Candles lit: n / m"
pub fn set_counter(label: &str) {
    if let Some(el) = document().and_then(|d| d.get_element_by_id("candleCount")) {
        el.set_text_content(Some(label));
    }
}

/// Reveal the birthday message, then fade it in on the next beat
pub fn show_message() {
    let Some(msg) = document().and_then(|d| d.get_element_by_id("message")) else {
        return;
    };
    let _ = msg.class_list().remove_1("hidden");

    let Some(window) = web_sys::window() else {
        return;
    };
    let fade_in = Closure::once_into_js(move || {
        let _ = msg.class_list().add_1("show");
    });
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        fade_in.unchecked_ref(),
        100,
    );
}

/// `origin + pathname` of the current page
pub fn page_base() -> Option<(String, String)> {
    let location = web_sys::window()?.location();
    Some((location.origin().ok()?, location.pathname().ok()?))
}

/// Query string of the current page (with leading `?`, or empty)
pub fn page_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Write `url` to the clipboard
pub async fn copy_to_clipboard(url: &str) -> Result<(), ShareError> {
    let describe = |e: JsValue| ShareError::Rejected(format!("{e:?}"));
    let promise = write_clipboard(url).map_err(describe)?;
    JsFuture::from(promise).await.map_err(describe)?;
    Ok(())
}

/// Copy the share link and tell the user how it went
pub async fn share(url: String) {
    let Some(window) = web_sys::window() else {
        log::error!("Share failed: {}", ShareError::NoWindow);
        return;
    };
    match copy_to_clipboard(&url).await {
        Ok(()) => {
            log::info!("Share link copied ({} chars)", url.len());
            let _ = window.alert_with_message(&format!(
                "✅ Share link copied! Send it to your friend:\n{url}"
            ));
        }
        Err(e) => {
            log::error!("Share failed: {e}");
            let _ = window.alert_with_message(&format!(
                "❌ Could not copy the share link ({e}). Copy it manually:\n{url}"
            ));
        }
    }
}
