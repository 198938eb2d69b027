//! Global application state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).
//! The controller owns the session state itself; this slot only makes it
//! reachable from DOM callbacks.

use std::cell::RefCell;
use tp_wallet_core::ConnectionController;

thread_local! {
    static CONTROLLER: RefCell<Option<ConnectionController>> = const { RefCell::new(None) };
}

/// Publish the controller once bootstrap has picked a session mode.
pub fn install(controller: ConnectionController) {
    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller));
}

/// Cheap handle clone; `None` until bootstrap finishes.
pub fn controller() -> Option<ConnectionController> {
    CONTROLLER.with(|slot| slot.borrow().clone())
}
