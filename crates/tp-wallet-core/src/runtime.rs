//! Timer and task seam.
//!
//! The browser build backs this with gloo-timers and `spawn_local`; tests use
//! tokio's paused clock.

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

#[async_trait(?Send)]
pub trait Runtime {
    async fn sleep(&self, duration: Duration);

    /// Run `task` once after `after`. Dropping the returned handle cancels it.
    fn defer(&self, after: Duration, task: Box<dyn FnOnce()>) -> Deferred;

    fn spawn(&self, task: LocalTask);
}

/// Handle to a pending deferred task.
#[must_use = "dropping a Deferred cancels the task"]
pub struct Deferred {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Deferred {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for Deferred {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
