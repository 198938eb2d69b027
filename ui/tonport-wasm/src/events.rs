//! Event binding.
//!
//! Every handler looks the controller up at click time; clicks that arrive
//! before bootstrap has installed it are dropped.

use crate::dom::Elements;
use crate::state;
use tp_wallet_core::ConnectionController;
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Helper: attach an async click handler that receives the controller.
macro_rules! on_click_async {
    ($el:expr, $handler:expr) => {{
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let Some(controller) = state::controller() else {
                debug!("click ignored, still starting up");
                return;
            };
            let pending = ($handler)(controller);
            wasm_bindgen_futures::spawn_local(async move {
                pending.await;
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Helper: attach a sync click handler that receives the controller.
macro_rules! on_click {
    ($el:expr, $handler:expr) => {{
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            if let Some(controller) = state::controller() {
                ($handler)(&controller);
            }
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements) -> Result<(), JsValue> {
    // ── Wallet shortcuts ──
    for button in &els.wallet_buttons {
        let hint = button.get_attribute("data-wallet").unwrap_or_default();
        on_click_async!(button, |controller: ConnectionController| {
            let hint = hint.clone();
            async move { controller.request_connect(&hint).await }
        });
    }

    on_click_async!(els.show_qr_btn, |controller: ConnectionController| async move {
        controller.request_show_qr().await
    });
    on_click!(els.back_btn, ConnectionController::show_disconnected);

    // ── Connected card ──
    on_click_async!(els.disconnect_btn, |controller: ConnectionController| async move {
        controller.request_disconnect().await
    });
    on_click_async!(els.copy_address_btn, |controller: ConnectionController| async move {
        controller.copy_address().await
    });

    Ok(())
}
