use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

// ═══════════════════════════════════════════════════════════════════════════════
// SHUTDOWN SIGNAL
// ═══════════════════════════════════════════════════════════════════════════════
//
// Ctrl+C (and SIGTERM where ctrlc supports it) sets the flag and wakes the
// listener. The listener finishes the message it is handling, stops between
// polls and flushes the log before exit.
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct ShutdownSignal {
    requested: AtomicBool,
    notify: Notify,
}

impl ShutdownSignal {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn trigger(&self) {
        self.requested.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Resolve once shutdown has been requested
    pub async fn wait(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_requested() {
                return;
            }
            notified.await;
        }
    }
}

/// Install the Ctrl+C handler for `signal`
pub fn install_shutdown_handlers(signal: Arc<ShutdownSignal>) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        if signal.is_requested() {
            println!("\n🛑 [SIGNAL] Second Ctrl+C, exiting immediately");
            std::process::exit(130);
        }
        println!("\n🛑 [SIGNAL] Received Ctrl+C, stopping after the current poll...");
        signal.trigger();
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_returns_after_trigger() {
        let signal = ShutdownSignal::new();
        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.wait().await })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!signal.is_requested());
        signal.trigger();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("wait() did not resolve")
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_after_trigger_is_immediate() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        tokio::time::timeout(Duration::from_millis(100), signal.wait())
            .await
            .unwrap();
    }
}
