//! TonPort wallet card, WASM front-end.
//!
//! Binds the page, brings up the TON Connect SDK (or the demo simulator when it
//! is unavailable) and hands every user action to the connection controller.

pub mod api;
pub mod background;
pub mod config;
pub mod dom;
pub mod events;
pub mod particles;
pub mod qr;
pub mod runtime;
pub mod sdk;
pub mod state;
pub mod surface;

use std::rc::Rc;
use tp_toncenter::TonCenterClient;
use tp_wallet_client::BalanceSource;
use tp_wallet_core::{ConnectionController, DemoSession, Runtime, SessionAdapter, Surface};
use tracing::warn;
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    init().await
}

async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;
    dom::install_keyframes()?;

    // Purely decorative; the card works without it.
    if let Err(err) = background::start(&els.bg_canvas) {
        warn!(error = ?err, "background animation unavailable");
    }

    let config = config::AppConfig::from_location(&dom::window().location().href()?);

    let runtime: Rc<dyn Runtime> = Rc::new(runtime::BrowserRuntime);
    let surface: Rc<dyn Surface> = Rc::new(surface::DomSurface::new(els.clone(), &config));
    let balances: Rc<dyn BalanceSource> =
        Rc::new(TonCenterClient::new(config.balance_endpoint.clone()));
    let build = |adapter: SessionAdapter| {
        ConnectionController::new(
            adapter,
            Rc::clone(&balances),
            Rc::clone(&surface),
            Rc::clone(&runtime),
            &config.timings,
        )
    };
    let demo = || DemoSession::new(Rc::clone(&runtime), config.timings.clone());

    // One attempt at the live SDK; any failure commits the page to demo mode.
    let live = sdk::connect_live(&config).await;
    let mut controller = build(SessionAdapter::select(live, demo()));
    if let Err(err) = controller.attach() {
        warn!(error = %err, "wallet SDK subscription failed, running in demo mode");
        controller = build(SessionAdapter::Demo(demo()));
    }

    state::install(controller);
    events::bind_events(&els)?;

    Ok(())
}
