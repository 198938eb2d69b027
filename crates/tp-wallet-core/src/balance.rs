//! Balance retrieval and formatting.

use rand::Rng;
use std::fmt;
use tp_api_types::WalletAddress;
use tp_wallet_client::BalanceSource;
use tracing::warn;

pub const CURRENCY: &str = "TON";
pub const LOADING: &str = "Loading...";

const NANOTONS_PER_UNIT: u128 = 100_000; // 10^9 nanotons per TON, shown to 10^-4
const UNITS_PER_TON: u128 = 10_000;
const DEMO_UNITS_CEILING: u32 = 1_000_000; // 100 TON

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceDisplay {
    Live { nanotons: u128 },
    /// Locally generated stand-in, in ten-thousandths of a TON.
    Demo { units: u32 },
}

impl BalanceDisplay {
    /// Uniform pseudo-random value in `[0, 100)` TON.
    pub fn demo(rng: &mut impl Rng) -> Self {
        BalanceDisplay::Demo {
            units: rng.gen_range(0..DEMO_UNITS_CEILING),
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, BalanceDisplay::Demo { .. })
    }
}

impl fmt::Display for BalanceDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BalanceDisplay::Live { nanotons } => {
                let units = nanotons.saturating_add(NANOTONS_PER_UNIT / 2) / NANOTONS_PER_UNIT;
                write!(
                    f,
                    "{}.{:04} {CURRENCY}",
                    units / UNITS_PER_TON,
                    units % UNITS_PER_TON
                )
            }
            BalanceDisplay::Demo { units } => {
                let units = u128::from(units);
                write!(
                    f,
                    "{}.{:04} {CURRENCY} (demo)",
                    units / UNITS_PER_TON,
                    units % UNITS_PER_TON
                )
            }
        }
    }
}

/// Single lookup with no retry. Any failure is replaced by `fallback()`.
pub async fn fetch_balance<F>(
    source: &dyn BalanceSource,
    address: &WalletAddress,
    fallback: F,
) -> BalanceDisplay
where
    F: FnOnce() -> BalanceDisplay,
{
    match source.address_balance(address).await {
        Ok(nanotons) => BalanceDisplay::Live { nanotons },
        Err(err) => {
            warn!(address = %address, error = %err, "balance lookup failed, showing demo value");
            fallback()
        }
    }
}
