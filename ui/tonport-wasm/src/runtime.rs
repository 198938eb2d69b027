//! Browser timers and tasks behind the core `Runtime` seam.

use async_trait::async_trait;
use gloo_timers::callback::Timeout;
use std::time::Duration;
use tp_wallet_core::{Deferred, LocalTask, Runtime};

pub struct BrowserRuntime;

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

#[async_trait(?Send)]
impl Runtime for BrowserRuntime {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }

    fn defer(&self, after: Duration, task: Box<dyn FnOnce()>) -> Deferred {
        let timeout = Timeout::new(millis(after), task);
        // Dropping a gloo `Timeout` clears it.
        Deferred::new(move || drop(timeout))
    }

    fn spawn(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
