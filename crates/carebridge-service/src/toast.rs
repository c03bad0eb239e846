//! Toast sinks.

use std::sync::Mutex;

use carebridge_core::traits::{Toast, ToastLevel, Toaster};

/// Writes toasts to the log. Used by the background badge watcher.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingToaster;

impl Toaster for TracingToaster {
    fn show(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Error => tracing::warn!(message = %toast.message, "toast"),
            ToastLevel::Success | ToastLevel::Info => {
                tracing::info!(message = %toast.message, "toast")
            }
        }
    }
}

/// Collects toasts until the front end drains them for display.
#[derive(Debug, Default)]
pub struct ToastBuffer {
    /// Pending toasts, oldest first.
    pending: Mutex<Vec<Toast>>,
}

impl ToastBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending toast.
    pub fn drain(&self) -> Vec<Toast> {
        match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Copy of the pending toasts without removing them.
    pub fn snapshot(&self) -> Vec<Toast> {
        match self.pending.lock() {
            Ok(pending) => pending.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Pending toasts of one level.
    pub fn messages(&self, level: ToastLevel) -> Vec<String> {
        self.snapshot()
            .into_iter()
            .filter(|t| t.level == level)
            .map(|t| t.message)
            .collect()
    }
}

impl Toaster for ToastBuffer {
    fn show(&self, toast: Toast) {
        match self.pending.lock() {
            Ok(mut pending) => pending.push(toast),
            Err(poisoned) => poisoned.into_inner().push(toast),
        }
    }
}
