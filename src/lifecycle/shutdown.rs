//! Shutdown coordination.

use std::future::Future;

use tokio::sync::broadcast::{self, error::RecvError};

/// Broadcast shutdown trigger shared by a server and whoever stops it.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Future that completes once [`trigger`](Self::trigger) is called.
    ///
    /// Subscribes immediately, so a trigger sent after this call but before
    /// the future is first polled is not missed. If every `Shutdown` is
    /// dropped without triggering, the future never completes.
    pub fn notified(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            if let Err(RecvError::Closed) = rx.recv().await {
                std::future::pending::<()>().await;
            }
        }
    }

    pub fn trigger(&self) {
        if self.tx.send(()).is_err() {
            tracing::debug!("Shutdown triggered with no listeners");
        }
    }

    /// Number of futures still waiting for the trigger.
    pub fn waiting(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_wakes_waiters() {
        let shutdown = Shutdown::new();
        let first = shutdown.notified();
        let second = shutdown.notified();
        assert_eq!(shutdown.waiting(), 2);

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), async {
            first.await;
            second.await;
        })
        .await
        .expect("waiters should be released");
    }

    #[tokio::test]
    async fn test_untriggered_future_stays_pending() {
        let shutdown = Shutdown::new();
        let waiter = shutdown.notified();
        let result = tokio::time::timeout(Duration::from_millis(20), waiter).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_dropped_trigger_keeps_waiters_pending() {
        let shutdown = Shutdown::new();
        let waiter = shutdown.notified();
        drop(shutdown);

        let result = tokio::time::timeout(Duration::from_millis(20), waiter).await;
        assert!(result.is_err());
    }
}
