//! Network helpers: third-party script loading and JSON fetches.

use crate::dom;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use std::fmt;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlScriptElement;

/// Why a JSON fetch produced no value.
#[derive(Debug)]
pub enum FetchError {
    /// Transport failure or non-2xx status.
    Unavailable(String),
    /// The body arrived but did not decode into the expected shape.
    Invalid(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Unavailable(reason) | FetchError::Invalid(reason) => f.write_str(reason),
        }
    }
}

/// GET `url` and decode its JSON body.
pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| FetchError::Unavailable(e.to_string()))?;

    if !resp.ok() {
        return Err(FetchError::Unavailable(format!(
            "{} {}",
            resp.status(),
            resp.status_text()
        )));
    }

    resp.json::<T>()
        .await
        .map_err(|e| FetchError::Invalid(e.to_string()))
}

/// Append a `<script src=..>` to `<head>` and wait for it to load or fail.
pub async fn load_script(src: &str) -> Result<(), JsValue> {
    let doc = dom::document();
    let script: HtmlScriptElement = doc.create_element("script")?.dyn_into()?;
    script.set_src(src);

    let pending = script.clone();
    let src_owned = src.to_string();
    let loaded = js_sys::Promise::new(&mut move |resolve, reject| {
        let on_load = Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let failed = src_owned.clone();
        let on_error = Closure::once_into_js(move || {
            let _ = reject.call1(
                &JsValue::NULL,
                &JsValue::from_str(&format!("failed to load {failed}")),
            );
        });
        pending.set_onload(Some(on_load.unchecked_ref()));
        pending.set_onerror(Some(on_error.unchecked_ref()));
    });

    doc.head()
        .ok_or_else(|| JsValue::from_str("document has no <head>"))?
        .append_child(&script)?;
    JsFuture::from(loaded).await?;
    Ok(())
}

/// Best-effort readable text for a thrown JS value.
pub fn describe(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
