//! QR rendering through qrcodejs, loaded on first use.
//!
//! When the library cannot be loaded or throws, the raw payload is shown as
//! text so the link can still be copied by hand.

use crate::api;
use serde::Serialize;
use std::cell::Cell;
use tracing::warn;
use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    type QRCode;

    #[wasm_bindgen(constructor, catch)]
    fn new(container: &Element, options: &JsValue) -> Result<QRCode, JsValue>;
}

pub const QR_SIZE: u32 = 210;
const COLOR_DARK: &str = "#000000";
const COLOR_LIGHT: &str = "#ffffff";
/// `QRCode.CorrectLevel.M`.
const CORRECT_LEVEL_M: u8 = 0;

thread_local! {
    static LIBRARY_LOADED: Cell<bool> = const { Cell::new(false) };
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QrOptions<'a> {
    text: &'a str,
    width: u32,
    height: u32,
    color_dark: &'a str,
    color_light: &'a str,
    correct_level: u8,
}

impl<'a> QrOptions<'a> {
    fn for_payload(text: &'a str) -> Self {
        Self {
            text,
            width: QR_SIZE,
            height: QR_SIZE,
            color_dark: COLOR_DARK,
            color_light: COLOR_LIGHT,
            correct_level: CORRECT_LEVEL_M,
        }
    }
}

async fn ensure_library(script_url: &str) -> Result<(), JsValue> {
    if LIBRARY_LOADED.with(Cell::get) {
        return Ok(());
    }
    api::load_script(script_url).await?;
    LIBRARY_LOADED.with(|loaded| loaded.set(true));
    Ok(())
}

fn show_text(container: &Element, payload: &str) {
    container.set_inner_html("");
    container.set_text_content(Some(payload));
}

/// Replace the container contents with a QR code for `payload`.
pub async fn render(container: &Element, payload: &str, script_url: &str) {
    if let Err(err) = ensure_library(script_url).await {
        warn!(error = %api::describe(&err), "QR library unavailable");
        show_text(container, payload);
        return;
    }

    container.set_inner_html("");
    let drawn = serde_wasm_bindgen::to_value(&QrOptions::for_payload(payload))
        .map_err(JsValue::from)
        .and_then(|options| QRCode::new(container, &options));
    if let Err(err) = drawn {
        warn!(error = %api::describe(&err), "QR rendering failed");
        show_text(container, payload);
    }
}
