//! DOM rendering of controller output.

use crate::config::AppConfig;
use crate::dom::{self, Elements};
use crate::qr;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use gloo_timers::callback::Timeout;
use tp_api_types::UiState;
use tp_wallet_core::Surface;
use wasm_bindgen_futures::JsFuture;

const HIDDEN: &str = "hidden";
const TOAST_VISIBLE: &str = "show";
const CARD_PULSE_SHADOW: &str = "0 0 60px rgba(0, 152, 234, 0.4)";

pub struct DomSurface {
    els: Elements,
    qr_script_url: String,
    card_pulse_ms: u32,
}

impl DomSurface {
    pub fn new(els: Elements, config: &AppConfig) -> Self {
        Self {
            els,
            qr_script_url: config.qr_script_url.clone(),
            card_pulse_ms: u32::try_from(config.timings.card_pulse_ms).unwrap_or(u32::MAX),
        }
    }
}

#[async_trait(?Send)]
impl Surface for DomSurface {
    fn show_state(&self, state: UiState) {
        for panel in &self.els.panels {
            dom::add_class(panel, HIDDEN);
        }
        if let Some(panel) = self.els.panel(state.panel()) {
            dom::remove_class(panel, HIDDEN);
            dom::replay_fade_up(panel);
        }
    }

    fn show_account(&self, short: &str, full: &str) {
        self.els.wallet_address.set_text_content(Some(short));
        let _ = self.els.wallet_address.set_attribute("data-full", full);
    }

    fn show_balance(&self, text: &str) {
        self.els.wallet_balance.set_text_content(Some(text));
    }

    fn show_qr(&self, payload: &str) {
        let container = self.els.qr_container.clone();
        let payload = payload.to_string();
        let script_url = self.qr_script_url.clone();
        wasm_bindgen_futures::spawn_local(async move {
            qr::render(&container, &payload, &script_url).await;
        });
    }

    fn show_toast(&self, message: &str) {
        self.els.toast.set_text_content(Some(message));
        dom::add_class(&self.els.toast, TOAST_VISIBLE);
    }

    fn hide_toast(&self) {
        dom::remove_class(&self.els.toast, TOAST_VISIBLE);
    }

    fn pulse_card(&self) {
        let card = self.els.wallet_card.clone();
        dom::set_style(&card, "box-shadow", CARD_PULSE_SHADOW);
        Timeout::new(self.card_pulse_ms, move || dom::set_style(&card, "box-shadow", "")).forget();
    }

    async fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let promise = dom::window().navigator().clipboard().write_text(text);
        JsFuture::from(promise)
            .await
            .map_err(|e| anyhow!("clipboard write: {}", crate::api::describe(&e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_pulse_is_a_soft_blue_glow() {
        assert_eq!(CARD_PULSE_SHADOW, "0 0 60px rgba(0, 152, 234, 0.4)");
    }
}
