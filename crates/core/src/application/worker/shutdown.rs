// Worker Shutdown Token

use tokio::sync::watch;

/// Cooperative cancellation signal shared by every unit in the pool
#[derive(Clone, Debug)]
pub struct ShutdownToken {
    rx: watch::Receiver<bool>,
}

impl ShutdownToken {
    /// Check if shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for shutdown signal
    ///
    /// Resolves immediately if shutdown was already requested, and also when
    /// the sender is gone (nobody is left to keep the pipeline running).
    pub async fn wait(&mut self) {
        let _ = self.rx.wait_for(|stop| *stop).await;
    }
}

/// Shutdown sender
#[derive(Debug)]
pub struct ShutdownSender {
    tx: watch::Sender<bool>,
}

impl ShutdownSender {
    /// Signal shutdown to all units
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }
}

/// Create a shutdown channel
pub fn shutdown_channel() -> (ShutdownSender, ShutdownToken) {
    let (tx, rx) = watch::channel(false);
    (ShutdownSender { tx }, ShutdownToken { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready, task};

    #[test]
    fn test_wait_resolves_after_signal() {
        let (tx, mut token) = shutdown_channel();
        assert!(!token.is_shutdown());

        let mut waiting = task::spawn(token.wait());
        assert_pending!(waiting.poll());

        tx.shutdown();
        assert!(waiting.is_woken());
        assert_ready!(waiting.poll());
    }

    #[test]
    fn test_wait_after_signal_is_immediate() {
        let (tx, token) = shutdown_channel();
        tx.shutdown();

        let mut late = token.clone();
        assert!(late.is_shutdown());
        let mut waiting = task::spawn(late.wait());
        assert_ready!(waiting.poll());
    }
}
