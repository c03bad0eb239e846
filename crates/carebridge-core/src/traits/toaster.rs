//! Sink for transient user-facing messages.

use serde::{Deserialize, Serialize};

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    /// A user action completed.
    Success,
    /// Neutral information.
    Info,
    /// A user action failed and must be reinitiated.
    Error,
}

/// A transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// Severity.
    pub level: ToastLevel,
    /// Display text.
    pub message: String,
}

impl Toast {
    /// Create a new toast.
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Receives toasts from controllers.
///
/// Controllers never re-throw a failed remote call past this boundary
/// without first reporting it here.
pub trait Toaster: Send + Sync + std::fmt::Debug + 'static {
    /// Display a toast.
    fn show(&self, toast: Toast);

    /// Display a success toast.
    fn success(&self, message: &str) {
        self.show(Toast::new(ToastLevel::Success, message));
    }

    /// Display an informational toast.
    fn info(&self, message: &str) {
        self.show(Toast::new(ToastLevel::Info, message));
    }

    /// Display an error toast.
    fn error(&self, message: &str) {
        self.show(Toast::new(ToastLevel::Error, message));
    }
}
