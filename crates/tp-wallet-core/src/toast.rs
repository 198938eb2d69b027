//! Single-slot toast notifier.
//!
//! The latest message wins. Each message gets its own dismissal timer and any
//! earlier one is cancelled, so at most one dismissal is ever pending.

use crate::runtime::{Deferred, Runtime};
use crate::surface::Surface;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub struct Toaster {
    surface: Rc<dyn Surface>,
    runtime: Rc<dyn Runtime>,
    window: Duration,
    pending: RefCell<Option<Deferred>>,
}

impl Toaster {
    pub fn new(surface: Rc<dyn Surface>, runtime: Rc<dyn Runtime>, window: Duration) -> Self {
        Self {
            surface,
            runtime,
            window,
            pending: RefCell::new(None),
        }
    }

    pub fn notify(&self, message: impl AsRef<str>) {
        self.surface.show_toast(message.as_ref());

        let surface = Rc::clone(&self.surface);
        let dismissal = self
            .runtime
            .defer(self.window, Box::new(move || surface.hide_toast()));
        let previous = self.pending.replace(Some(dismissal));
        drop(previous);
    }
}
