//! Connection logic behind the TonPort wallet card.
//!
//! Everything here is runtime-agnostic: timers, task spawning and rendering are
//! reached through the [`Runtime`] and [`Surface`] traits so the same state machine
//! runs in the browser and under tokio in tests.

pub mod adapter;
pub mod address;
pub mod balance;
pub mod config;
pub mod controller;
pub mod demo;
pub mod runtime;
pub mod surface;
pub mod toast;

#[cfg(test)]
mod test_support;

pub use adapter::SessionAdapter;
pub use balance::BalanceDisplay;
pub use config::Timings;
pub use controller::{AppState, ConnectionController};
pub use demo::DemoSession;
pub use runtime::{Deferred, LocalTask, Runtime};
pub use surface::Surface;
pub use toast::Toaster;
