//! TON Connect UI bindings and the live wallet session built on them.
//!
//! The SDK is a UMD bundle that registers `window.TonConnectUI`; nothing here
//! touches it before `connect_live` has loaded the script.

use crate::api::{self, FetchError};
use crate::config::AppConfig;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Serialize;
use std::rc::Rc;
use tp_api_types::{ConnectedWallet, TonConnectManifest, WalletDescriptor};
use tp_wallet_client::{SessionError, StatusListener, WalletSession};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(js_namespace = TonConnectUI)]
extern "C" {
    #[wasm_bindgen(js_name = TonConnectUI)]
    pub type TonConnectUi;

    #[wasm_bindgen(constructor, catch)]
    fn new(options: &JsValue) -> Result<TonConnectUi, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getWallets)]
    async fn get_wallets(this: &TonConnectUi) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = openModal)]
    async fn open_modal(this: &TonConnectUi) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = openSingleWalletModal)]
    async fn open_single_wallet_modal(this: &TonConnectUi, app_name: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    async fn disconnect(this: &TonConnectUi) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, getter)]
    fn wallet(this: &TonConnectUi) -> JsValue;

    #[wasm_bindgen(method, catch, js_name = onStatusChange)]
    fn on_status_change(
        this: &TonConnectUi,
        callback: &Closure<dyn FnMut(JsValue)>,
    ) -> Result<JsValue, JsValue>;
}

/// Constructor options. `buttonRootId: null` keeps the SDK from rendering its
/// own connect button; the page has its own.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UiOptions<'a> {
    manifest_url: &'a str,
    button_root_id: Option<&'a str>,
}

/// Load the SDK, validate the manifest and construct the UI object.
///
/// Any error here means the page runs in demo mode for its whole lifetime.
pub async fn connect_live(config: &AppConfig) -> Result<Rc<dyn WalletSession>, SessionError> {
    api::load_script(&config.sdk_script_url)
        .await
        .map_err(|e| SessionError::SdkUnavailable(api::describe(&e)))?;

    let url = config.manifest_url.clone();
    let manifest: TonConnectManifest = api::fetch_json(&url).await.map_err(|e| match e {
        FetchError::Unavailable(reason) => SessionError::ManifestUnavailable {
            url: url.clone(),
            reason,
        },
        FetchError::Invalid(reason) => SessionError::ManifestInvalid {
            url: url.clone(),
            reason,
        },
    })?;
    debug!(app = %manifest.name, url = %manifest.url, "manifest loaded");

    let options = UiOptions {
        manifest_url: &config.manifest_url,
        button_root_id: None,
    }
    .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
    .map_err(|e| SessionError::InitFailed(e.to_string()))?;

    let ui = TonConnectUi::new(&options)
        .map_err(|e| SessionError::InitFailed(api::describe(&e)))?;
    info!(manifest = %config.manifest_url, "TON Connect UI ready");

    Ok(Rc::new(LiveSession { ui }))
}

pub struct LiveSession {
    ui: TonConnectUi,
}

fn js_err(context: &str, value: JsValue) -> anyhow::Error {
    anyhow!("{context}: {}", api::describe(&value))
}

/// `null`/`undefined` mean "no wallet"; anything undecodable is reported as `Err`.
fn parse_wallet(value: JsValue) -> Result<Option<ConnectedWallet>> {
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|e| anyhow!("unexpected wallet shape: {e}"))
}

#[async_trait(?Send)]
impl WalletSession for LiveSession {
    async fn wallets(&self) -> Result<Vec<WalletDescriptor>> {
        let list = self
            .ui
            .get_wallets()
            .await
            .map_err(|e| js_err("getWallets", e))?;
        serde_wasm_bindgen::from_value(list).map_err(|e| anyhow!("wallet list: {e}"))
    }

    async fn open_single_wallet(&self, app_name: &str) -> Result<()> {
        self.ui
            .open_single_wallet_modal(app_name)
            .await
            .map_err(|e| js_err("openSingleWalletModal", e))?;
        Ok(())
    }

    async fn open_modal(&self) -> Result<()> {
        self.ui
            .open_modal()
            .await
            .map_err(|e| js_err("openModal", e))?;
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        self.ui
            .disconnect()
            .await
            .map_err(|e| js_err("disconnect", e))?;
        Ok(())
    }

    fn current_wallet(&self) -> Option<ConnectedWallet> {
        match parse_wallet(self.ui.wallet()) {
            Ok(wallet) => wallet,
            Err(err) => {
                warn!(error = %err, "ignoring restored wallet");
                None
            }
        }
    }

    fn subscribe(&self, listener: StatusListener) -> Result<()> {
        let callback = Closure::wrap(Box::new(move |value: JsValue| match parse_wallet(value) {
            Ok(wallet) => listener(wallet),
            Err(err) => warn!(error = %err, "status change dropped"),
        }) as Box<dyn FnMut(JsValue)>);

        self.ui
            .on_status_change(&callback)
            .map_err(|e| js_err("onStatusChange", e))?;
        // The SDK keeps the subscription for the page lifetime.
        callback.forget();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn constructor_options_suppress_the_sdk_button() {
        let options = UiOptions {
            manifest_url: "https://example.org/tonconnect-manifest.json",
            button_root_id: None,
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "manifestUrl": "https://example.org/tonconnect-manifest.json",
                "buttonRootId": null,
            })
        );
    }
}
