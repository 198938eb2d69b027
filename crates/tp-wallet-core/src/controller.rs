//! Connection state machine.
//!
//! `Disconnected` → `AwaitingConnection` → `Connected` → `Disconnected`, with no
//! terminal state. The controller owns the only [`AppState`]; everything else sees
//! read-only snapshots.
//!
//! Demo sequences and balance lookups resume after timers and network calls. Each
//! captures a ticket before suspending and re-checks it afterwards, so a
//! disconnect (or a newer attempt) always wins over a stale continuation.

use crate::adapter::SessionAdapter;
use crate::address::{shorten, to_display_form, wallet_label};
use crate::balance::{self, BalanceDisplay};
use crate::config::Timings;
use crate::runtime::Runtime;
use crate::surface::Surface;
use crate::toast::Toaster;
use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tp_api_types::{ConnectedWallet, Session, SessionMode, UiState, WalletAddress};
use tp_wallet_client::{BalanceSource, WalletSession, find_wallet};
use tracing::{debug, error, info, warn};

pub const MSG_CONNECTED: &str = "✅ Wallet connected!";
pub const MSG_DISCONNECTED: &str = "Wallet disconnected";
pub const MSG_CONNECT_FAILED: &str = "Could not open the wallet. Try the QR code.";
pub const MSG_QR_FAILED: &str = "Could not open the QR code. Try again.";
pub const MSG_DEMO_SCANNING: &str = "Demo: simulating connection...";
pub const MSG_COPIED: &str = "📋 Address copied!";
pub const MSG_COPY_FAILED: &str = "Could not copy the address";

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: Session,
    pub ui: UiState,
    pub balance: Option<BalanceDisplay>,
    /// Bumped by every new attempt, connect and disconnect.
    attempt: u64,
    /// Bumped by every connect and disconnect.
    session_epoch: u64,
}

#[derive(Clone)]
pub struct ConnectionController {
    inner: Rc<Inner>,
}

struct Inner {
    adapter: SessionAdapter,
    balances: Rc<dyn BalanceSource>,
    surface: Rc<dyn Surface>,
    runtime: Rc<dyn Runtime>,
    toaster: Toaster,
    state: RefCell<AppState>,
    rng: RefCell<StdRng>,
}

impl ConnectionController {
    pub fn new(
        adapter: SessionAdapter,
        balances: Rc<dyn BalanceSource>,
        surface: Rc<dyn Surface>,
        runtime: Rc<dyn Runtime>,
        timings: &Timings,
    ) -> Self {
        let state = AppState {
            session: Session {
                address: None,
                mode: Some(adapter.mode()),
            },
            ..AppState::default()
        };
        let toaster = Toaster::new(
            Rc::clone(&surface),
            Rc::clone(&runtime),
            timings.toast_window(),
        );
        surface.show_state(UiState::Disconnected);

        Self {
            inner: Rc::new(Inner {
                adapter,
                balances,
                surface,
                runtime,
                toaster,
                state: RefCell::new(state),
                rng: RefCell::new(StdRng::from_entropy()),
            }),
        }
    }

    // ── Snapshots ──

    pub fn mode(&self) -> SessionMode {
        self.inner.adapter.mode()
    }

    pub fn ui_state(&self) -> UiState {
        self.inner.state.borrow().ui
    }

    pub fn session(&self) -> Session {
        self.inner.state.borrow().session.clone()
    }

    pub fn balance(&self) -> Option<BalanceDisplay> {
        self.inner.state.borrow().balance
    }

    pub fn notify(&self, message: impl AsRef<str>) {
        self.inner.toaster.notify(message);
    }

    // ── Live SDK wiring ──

    /// Subscribe to SDK status changes and adopt a session the SDK already holds.
    /// No-op in demo mode.
    pub fn attach(&self) -> Result<()> {
        let SessionAdapter::Live(session) = &self.inner.adapter else {
            return Ok(());
        };

        let weak = Rc::downgrade(&self.inner);
        session.subscribe(Box::new(move |wallet| {
            let Some(controller) = upgrade(&weak) else {
                return;
            };
            let runtime = Rc::clone(&controller.inner.runtime);
            runtime.spawn(Box::pin(async move {
                controller.handle_status_change(wallet).await;
            }));
        }))?;

        if let Some(wallet) = session.current_wallet() {
            info!("restoring existing wallet session");
            let controller = self.clone();
            self.inner.runtime.spawn(Box::pin(async move {
                controller.handle_status_change(Some(wallet)).await;
            }));
        }
        Ok(())
    }

    /// Apply an SDK status change. Repeats of the current status are ignored.
    pub async fn handle_status_change(&self, wallet: Option<ConnectedWallet>) {
        let current = self.session().address;
        match wallet {
            Some(wallet) => {
                let address = to_display_form(&wallet.account.address);
                if current.as_ref() == Some(&address) {
                    debug!(address = %address, "status change repeats current session");
                    return;
                }
                self.notify_connected(&wallet.account.address).await;
            }
            None => {
                if current.is_none() {
                    debug!("status change without an active session");
                    return;
                }
                self.notify_disconnected();
            }
        }
    }

    // ── Operations ──

    /// Connect to a wallet by its hint key (e.g. `tonkeeper`).
    pub async fn request_connect(&self, wallet_hint: &str) {
        if self.ui_state() == UiState::Connected {
            debug!(wallet = wallet_hint, "connect requested while connected");
            return;
        }
        self.inner.surface.pulse_card();
        let label = wallet_label(wallet_hint);

        match &self.inner.adapter {
            SessionAdapter::Demo(demo) => {
                self.notify(format!("Demo: opening {label}..."));
                let ticket = self.begin_attempt();
                let address = demo.connect().await;
                if !self.is_current(ticket) {
                    debug!(wallet = wallet_hint, "demo connect superseded");
                    return;
                }
                self.notify_connected(address.as_str()).await;
            }
            SessionAdapter::Live(session) => {
                self.notify(format!("Opening {label}..."));
                if let Err(err) = open_wallet(session.as_ref(), wallet_hint).await {
                    error!(wallet = wallet_hint, error = %err, "failed to open wallet");
                    self.notify(MSG_CONNECT_FAILED);
                }
            }
        }
    }

    /// Show the QR panel. In demo mode the scan and approval are simulated.
    pub async fn request_show_qr(&self) {
        if self.ui_state() == UiState::Connected {
            debug!("QR requested while connected");
            return;
        }
        let ticket = self.begin_attempt();
        self.transition(UiState::AwaitingConnection);

        match &self.inner.adapter {
            SessionAdapter::Live(session) => {
                // The SDK modal owns the QR code from here on.
                let opened = session.open_modal().await;
                if let Err(err) = &opened {
                    error!(error = %err, "failed to open connection modal");
                    self.notify(MSG_QR_FAILED);
                }
                if self.is_current(ticket) && self.ui_state() == UiState::AwaitingConnection {
                    self.transition(UiState::Disconnected);
                }
            }
            SessionAdapter::Demo(demo) => {
                self.inner.surface.show_qr(&demo.qr_payload());

                demo.observe_scan().await;
                if !self.is_current(ticket) {
                    debug!("demo QR abandoned before scan");
                    return;
                }
                self.notify(MSG_DEMO_SCANNING);

                let address = demo.approve().await;
                if !self.is_current(ticket) {
                    debug!("demo QR abandoned before approval");
                    return;
                }
                self.notify_connected(address.as_str()).await;
            }
        }
    }

    /// Back out of the QR panel, abandoning any pending demo sequence.
    pub fn show_disconnected(&self) {
        if self.ui_state() == UiState::Connected {
            return;
        }
        self.begin_attempt();
        self.transition(UiState::Disconnected);
    }

    /// A session was established; replaces any previous one.
    pub async fn notify_connected(&self, raw_address: &str) {
        let address = to_display_form(raw_address);
        let epoch = {
            let mut state = self.inner.state.borrow_mut();
            state.session.address = Some(address.clone());
            state.balance = None;
            state.ui = UiState::Connected;
            state.attempt += 1;
            state.session_epoch += 1;
            state.session_epoch
        };

        let surface = &self.inner.surface;
        surface.show_state(UiState::Connected);
        surface.show_account(&shorten(address.as_str()), address.as_str());
        surface.show_balance(balance::LOADING);
        self.notify(MSG_CONNECTED);
        info!(address = %address, mode = ?self.mode(), "wallet connected");

        self.refresh_balance(address, epoch).await;
    }

    /// User-initiated disconnect. The local reset happens even if teardown fails.
    pub async fn request_disconnect(&self) {
        if let SessionAdapter::Live(session) = &self.inner.adapter {
            if let Err(err) = session.disconnect().await {
                error!(error = %err, "wallet SDK disconnect failed");
            }
        }
        self.notify_disconnected();
    }

    /// The session ended elsewhere (e.g. in the SDK's own UI). No remote teardown.
    pub fn notify_disconnected(&self) {
        {
            let mut state = self.inner.state.borrow_mut();
            state.session.address = None;
            state.balance = None;
            state.ui = UiState::Disconnected;
            state.attempt += 1;
            state.session_epoch += 1;
        }
        self.inner.surface.show_state(UiState::Disconnected);
        self.notify(MSG_DISCONNECTED);
        info!("wallet disconnected");
    }

    /// Copy the full address to the clipboard.
    pub async fn copy_address(&self) {
        let Some(address) = self.session().address else {
            debug!("copy requested without a session");
            return;
        };
        match self.inner.surface.copy_to_clipboard(address.as_str()).await {
            Ok(()) => self.notify(MSG_COPIED),
            Err(err) => {
                warn!(error = %err, "clipboard write failed");
                self.notify(MSG_COPY_FAILED);
            }
        }
    }

    // ── Internals ──

    async fn refresh_balance(&self, address: WalletAddress, epoch: u64) {
        let display = balance::fetch_balance(self.inner.balances.as_ref(), &address, || {
            BalanceDisplay::demo(&mut *self.inner.rng.borrow_mut())
        })
        .await;

        {
            let mut state = self.inner.state.borrow_mut();
            if state.session_epoch != epoch {
                debug!(address = %address, "discarding balance for a replaced session");
                return;
            }
            state.balance = Some(display);
        }
        self.inner.surface.show_balance(&display.to_string());
    }

    fn transition(&self, ui: UiState) {
        self.inner.state.borrow_mut().ui = ui;
        self.inner.surface.show_state(ui);
    }

    fn begin_attempt(&self) -> u64 {
        let mut state = self.inner.state.borrow_mut();
        state.attempt += 1;
        state.attempt
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.inner.state.borrow().attempt == ticket
    }
}

fn upgrade(weak: &Weak<Inner>) -> Option<ConnectionController> {
    weak.upgrade().map(|inner| ConnectionController { inner })
}

async fn open_wallet(session: &dyn WalletSession, hint: &str) -> Result<()> {
    let wallets = session.wallets().await?;
    match find_wallet(&wallets, hint) {
        Some(wallet) => session.open_single_wallet(&wallet.app_name).await,
        None => {
            debug!(wallet = hint, "no matching wallet, opening selection modal");
            session.open_modal().await
        }
    }
}
