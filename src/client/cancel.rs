//! Stream Cancellation
//!
//! An explicit stop signal for long-running completion streams, checked before
//! every chunk read so a caller can halt a stream deterministically instead of
//! abandoning the connection.

use tokio::sync::watch;

/// Caller-side handle used to stop a running stream
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

/// Signal threaded through a stream's read loop
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

/// Create a connected handle/signal pair.
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelSignal { rx })
}

impl CancelHandle {
    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

impl CancelSignal {
    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once cancellation is requested.
    ///
    /// If the handle is dropped without cancelling, this never resolves and
    /// the stream runs to its natural end.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow() {
                return;
            }
            if self.rx.changed().await.is_err() {
                futures::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancel_is_observed() {
        let (handle, signal) = cancel_pair();
        assert!(!signal.is_cancelled());

        handle.cancel();
        assert!(signal.is_cancelled());

        let mut signal = signal;
        signal.cancelled().await; // must resolve immediately
    }

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let (handle, signal) = cancel_pair();
        handle.cancel();
        handle.cancel();
        assert!(signal.is_cancelled());
    }

    #[tokio::test]
    async fn test_dropped_handle_does_not_cancel() {
        let (handle, mut signal) = cancel_pair();
        drop(handle);
        assert!(!signal.is_cancelled());

        let pending = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            signal.cancelled(),
        )
        .await;
        assert!(pending.is_err());
    }
}
