//! User Notifications
//!
//! Fire-and-forget notification sink for user-facing failure notices (the
//! toast surface of a UI layer). Notifications never affect control flow or
//! return values.

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// User-facing notification sink
pub trait Notifier: Send + Sync {
    /// Deliver one notification.
    fn notify(&self, severity: Severity, message: &str);

    /// Convenience for error notices.
    fn error(&self, message: &str) {
        self.notify(Severity::Error, message);
    }

    /// Convenience for success notices.
    fn success(&self, message: &str) {
        self.notify(Severity::Success, message);
    }
}

/// Default sink forwarding notifications to `tracing`
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => tracing::error!(target: "agentry::notify", "{}", message),
            Severity::Success | Severity::Info => {
                tracing::info!(target: "agentry::notify", "{}", message)
            }
        }
    }
}

/// Sink that discards all notifications
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _severity: Severity, _message: &str) {}
}
