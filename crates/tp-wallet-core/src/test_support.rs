//! Test doubles for the runtime, surface and wallet seams.

use crate::runtime::{Deferred, LocalTask, Runtime};
use crate::surface::Surface;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::time::Duration;
use tokio::time::Instant;
use tp_api_types::{ConnectedWallet, UiState, WalletAddress, WalletDescriptor};
use tp_wallet_client::{BalanceSource, StatusListener, WalletSession};

/// Runs on the current `LocalSet`; pair with `start_paused` for virtual time.
pub struct TokioRuntime;

#[async_trait(?Send)]
impl Runtime for TokioRuntime {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn defer(&self, after: Duration, task: Box<dyn FnOnce()>) -> Deferred {
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(after).await;
            task();
        });
        Deferred::new(move || handle.abort())
    }

    fn spawn(&self, task: LocalTask) {
        drop(tokio::task::spawn_local(task));
    }
}

#[derive(Default)]
pub struct RecordingSurface {
    states: RefCell<Vec<UiState>>,
    account: RefCell<Option<(String, String)>>,
    balance: RefCell<Option<String>>,
    qr: RefCell<Option<String>>,
    toast: RefCell<Option<String>>,
    toasts: RefCell<Vec<String>>,
    hides: Cell<u32>,
    pulses: Cell<u32>,
    clipboard: RefCell<Option<String>>,
    clipboard_broken: Cell<bool>,
}

impl RecordingSurface {
    pub fn state(&self) -> Option<UiState> {
        self.states.borrow().last().copied()
    }

    pub fn states(&self) -> Vec<UiState> {
        self.states.borrow().clone()
    }

    pub fn account(&self) -> Option<(String, String)> {
        self.account.borrow().clone()
    }

    pub fn balance(&self) -> Option<String> {
        self.balance.borrow().clone()
    }

    pub fn qr(&self) -> Option<String> {
        self.qr.borrow().clone()
    }

    /// Currently visible toast.
    pub fn toast(&self) -> Option<String> {
        self.toast.borrow().clone()
    }

    /// Every toast ever shown, oldest first.
    pub fn toasts(&self) -> Vec<String> {
        self.toasts.borrow().clone()
    }

    pub fn hide_count(&self) -> u32 {
        self.hides.get()
    }

    pub fn pulses(&self) -> u32 {
        self.pulses.get()
    }

    pub fn clipboard(&self) -> Option<String> {
        self.clipboard.borrow().clone()
    }

    pub fn fail_clipboard(&self) {
        self.clipboard_broken.set(true);
    }
}

#[async_trait(?Send)]
impl Surface for RecordingSurface {
    fn show_state(&self, state: UiState) {
        self.states.borrow_mut().push(state);
    }

    fn show_account(&self, short: &str, full: &str) {
        *self.account.borrow_mut() = Some((short.to_owned(), full.to_owned()));
    }

    fn show_balance(&self, text: &str) {
        *self.balance.borrow_mut() = Some(text.to_owned());
    }

    fn show_qr(&self, payload: &str) {
        *self.qr.borrow_mut() = Some(payload.to_owned());
    }

    fn show_toast(&self, message: &str) {
        *self.toast.borrow_mut() = Some(message.to_owned());
        self.toasts.borrow_mut().push(message.to_owned());
    }

    fn hide_toast(&self) {
        *self.toast.borrow_mut() = None;
        self.hides.set(self.hides.get() + 1);
    }

    fn pulse_card(&self) {
        self.pulses.set(self.pulses.get() + 1);
    }

    async fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        if self.clipboard_broken.get() {
            return Err(anyhow!("clipboard permission denied"));
        }
        *self.clipboard.borrow_mut() = Some(text.to_owned());
        Ok(())
    }
}

pub struct FakeBalance {
    nanotons: Option<u128>,
    delay: Duration,
}

impl FakeBalance {
    pub fn returning(nanotons: u128) -> Self {
        Self {
            nanotons: Some(nanotons),
            delay: Duration::ZERO,
        }
    }

    pub fn failing() -> Self {
        Self {
            nanotons: None,
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }
}

#[async_trait(?Send)]
impl BalanceSource for FakeBalance {
    async fn address_balance(&self, _address: &WalletAddress) -> Result<u128> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.nanotons.ok_or_else(|| anyhow!("balance service unreachable"))
    }
}

#[derive(Default)]
pub struct FakeWalletSession {
    pub wallets: Vec<WalletDescriptor>,
    pub current: Option<ConnectedWallet>,
    pub fail_wallets: bool,
    pub fail_modal: bool,
    pub fail_disconnect: bool,
    pub fail_subscribe: bool,
    pub(crate) opened_single: RefCell<Vec<String>>,
    pub(crate) modal_opens: Cell<u32>,
    pub(crate) disconnects: Cell<u32>,
    pub(crate) listener: RefCell<Option<StatusListener>>,
}

impl FakeWalletSession {
    pub fn opened_single(&self) -> Vec<String> {
        self.opened_single.borrow().clone()
    }

    pub fn modal_opens(&self) -> u32 {
        self.modal_opens.get()
    }

    pub fn disconnects(&self) -> u32 {
        self.disconnects.get()
    }

    pub fn has_listener(&self) -> bool {
        self.listener.borrow().is_some()
    }

    /// Fire the status listener the way the SDK would.
    pub fn emit(&self, wallet: Option<ConnectedWallet>) {
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener(wallet);
        }
    }
}

#[async_trait(?Send)]
impl WalletSession for FakeWalletSession {
    async fn wallets(&self) -> Result<Vec<WalletDescriptor>> {
        if self.fail_wallets {
            return Err(anyhow!("wallets list unavailable"));
        }
        Ok(self.wallets.clone())
    }

    async fn open_single_wallet(&self, app_name: &str) -> Result<()> {
        self.opened_single.borrow_mut().push(app_name.to_owned());
        Ok(())
    }

    async fn open_modal(&self) -> Result<()> {
        if self.fail_modal {
            return Err(anyhow!("modal already open"));
        }
        self.modal_opens.set(self.modal_opens.get() + 1);
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        self.disconnects.set(self.disconnects.get() + 1);
        if self.fail_disconnect {
            return Err(anyhow!("bridge unreachable"));
        }
        Ok(())
    }

    fn current_wallet(&self) -> Option<ConnectedWallet> {
        self.current.clone()
    }

    fn subscribe(&self, listener: StatusListener) -> Result<()> {
        if self.fail_subscribe {
            return Err(anyhow!("onStatusChange threw"));
        }
        *self.listener.borrow_mut() = Some(listener);
        Ok(())
    }
}

pub fn is_demo_address(address: &str) -> bool {
    address.len() == 49
        && address.starts_with("UQD")
        && address[3..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

/// Virtual-clock elapsed time, allowing for timer-wheel granularity.
pub fn assert_elapsed(start: Instant, expected_ms: u64) {
    let elapsed = start.elapsed();
    let expected = Duration::from_millis(expected_ms);
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(5),
        "expected ~{expected:?}, got {elapsed:?}"
    );
}
