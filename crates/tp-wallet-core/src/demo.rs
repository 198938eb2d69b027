//! Local stand-in for a wallet when the SDK is unavailable.
//!
//! Never touches the network: every "wallet" step is a fixed delay followed by a
//! locally generated pseudo-address.

use crate::config::Timings;
use crate::runtime::Runtime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;
use tp_api_types::WalletAddress;
use uuid::Uuid;

pub const DEMO_ADDRESS_PREFIX: &str = "UQD";
pub const DEMO_ADDRESS_HEX_LEN: usize = 46;
pub const DEMO_QR_PREFIX: &str = "ton://connect?id=demo_";

const HEX: &[u8; 16] = b"0123456789abcdef";

pub fn random_hex(rng: &mut impl Rng, len: usize) -> String {
    (0..len).map(|_| HEX[rng.gen_range(0..HEX.len())] as char).collect()
}

pub fn demo_address(rng: &mut impl Rng) -> WalletAddress {
    WalletAddress(format!(
        "{DEMO_ADDRESS_PREFIX}{}",
        random_hex(rng, DEMO_ADDRESS_HEX_LEN)
    ))
}

/// `ton://connect?id=demo_` followed by 32 lowercase hex characters.
pub fn demo_qr_payload() -> String {
    format!("{DEMO_QR_PREFIX}{}", Uuid::new_v4().simple())
}

pub struct DemoSession {
    runtime: Rc<dyn Runtime>,
    timings: Timings,
    rng: RefCell<StdRng>,
}

impl DemoSession {
    pub fn new(runtime: Rc<dyn Runtime>, timings: Timings) -> Self {
        Self {
            runtime,
            timings,
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    /// Wallet opened by name: approves after the connect delay.
    pub async fn connect(&self) -> WalletAddress {
        self.runtime.sleep(self.timings.demo_connect_delay()).await;
        self.next_address()
    }

    pub fn qr_payload(&self) -> String {
        demo_qr_payload()
    }

    /// Time the user would spend pointing a phone at the code.
    pub async fn observe_scan(&self) {
        self.runtime.sleep(self.timings.demo_scan_delay()).await;
    }

    /// Approval in the scanning wallet.
    pub async fn approve(&self) -> WalletAddress {
        self.runtime.sleep(self.timings.demo_approval_delay()).await;
        self.next_address()
    }

    fn next_address(&self) -> WalletAddress {
        demo_address(&mut *self.rng.borrow_mut())
    }
}
