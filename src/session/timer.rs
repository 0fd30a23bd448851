//! Cancellable per-round countdown on the tokio runtime.
//!
//! The expiry callback lives in a shared slot. Whoever takes it first wins:
//! the sleeping task (expiry) or [`Countdown::cancel`]. That makes the
//! callback fire at most once, and a cancel that lands before expiry always
//! suppresses it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

type Callback = Box<dyn FnOnce() + Send + 'static>;

pub struct Countdown {
    slot: Arc<Mutex<Option<Callback>>>,
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Arm a countdown. Must be called from within a tokio runtime.
    pub fn start<F>(duration: Duration, on_expire: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let slot: Arc<Mutex<Option<Callback>>> = Arc::new(Mutex::new(Some(Box::new(on_expire))));
        let task_slot = Arc::clone(&slot);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let callback = take(&task_slot);
            if let Some(callback) = callback {
                callback();
            }
        });
        Countdown { slot, handle }
    }

    /// Disarm the countdown. Returns true if the callback was suppressed,
    /// false if it had already fired (or was cancelled before).
    pub fn cancel(&self) -> bool {
        self.handle.abort();
        take(&self.slot).is_some()
    }

    /// True until the callback fires or the countdown is cancelled.
    pub fn is_armed(&self) -> bool {
        match self.slot.lock() {
            Ok(slot) => slot.is_some(),
            Err(poisoned) => poisoned.into_inner().is_some(),
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn take(slot: &Mutex<Option<Callback>>) -> Option<Callback> {
    match slot.lock() {
        Ok(mut guard) => guard.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    }
}
