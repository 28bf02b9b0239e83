//! User-facing status notifications.
//!
//! The core reports per-item and aggregate sync outcomes through this seam;
//! how they are displayed (console, status bar, ...) is the host's concern.

use tracing::info;

#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Prints notifications to stdout and mirrors them into the trace stream.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        info!(message, "notification");
        println!("{message}");
    }
}
