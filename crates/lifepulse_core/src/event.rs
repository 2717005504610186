//! Cross-subsystem application events.
//!
//! The only producer today is the account-deletion flow; the application
//! shell subscribes to clear its onboarding flag and return to first-run.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Global application event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// All user data has been wiped; subscribers must reset their own
    /// flags.
    AccountDeleted,
}

type Subscriber = Box<dyn Fn(&AppEvent) + Send + Sync>;

/// Minimal broadcast bus for [`AppEvent`].
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback invoked on every emitted event.
    pub fn subscribe(&self, callback: impl Fn(&AppEvent) + Send + Sync + 'static) {
        self.lock().push(Box::new(callback));
    }

    /// Delivers `event` to every subscriber, in subscription order.
    pub fn emit(&self, event: &AppEvent) {
        for subscriber in self.lock().iter() {
            subscriber(event);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Subscriber>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
