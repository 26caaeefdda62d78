//! Request-scoped cancellation
//!
//! The gRPC service owns a root Context that is cancelled by StopProvider.
//! Every RPC runs with a child of that root, so a stop request aborts
//! in-flight API calls instead of waiting for them.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Context carries cancellation and deadlines across async boundaries
/// Pass this as the first parameter to all async trait methods
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    deadline: Option<Instant>,
    cancel_tx: watch::Sender<bool>,
    parent: Option<Context>,
}

impl Context {
    pub fn new() -> Self {
        Self::build(None, None)
    }

    fn build(parent: Option<Context>, deadline: Option<Instant>) -> Self {
        let (cancel_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(ContextInner {
                deadline,
                cancel_tx,
                parent,
            }),
        }
    }

    /// A context cancelled together with this one, but cancellable on its own
    pub fn child(&self) -> Self {
        Self::build(Some(self.clone()), self.inner.deadline)
    }

    /// A child context that is also cancelled once the timeout elapses
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        let deadline = match self.inner.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        };
        Self::build(Some(self.clone()), Some(deadline))
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    pub fn cancel(&self) {
        self.inner.cancel_tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.cancel_tx.borrow()
            || self.inner.deadline.is_some_and(|d| Instant::now() >= d)
            || self.inner.parent.as_ref().is_some_and(Context::is_cancelled)
    }

    /// Resolves once this context or any ancestor is cancelled
    pub fn cancelled(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            let mut rx = self.inner.cancel_tx.subscribe();
            let parent = self.inner.parent.as_ref();
            let deadline = self.inner.deadline;

            loop {
                if *rx.borrow_and_update() {
                    return;
                }
                tokio::select! {
                    changed = rx.changed() => {
                        if changed.is_err() {
                            std::future::pending::<()>().await;
                        }
                    }
                    _ = async {
                        match parent {
                            Some(p) => p.cancelled().await,
                            None => std::future::pending::<()>().await,
                        }
                    } => return,
                    _ = async {
                        match deadline {
                            Some(d) => tokio::time::sleep_until(d.into()).await,
                            None => std::future::pending::<()>().await,
                        }
                    } => return,
                }
            }
        })
    }

    /// Drives `fut` to completion unless the context is cancelled first
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_cancelled() {
            return None;
        }
        tokio::select! {
            out = fut => Some(out),
            _ = self.cancelled() => None,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test]
    async fn context_timeout_cancels() {
        let ctx = Context::new().with_timeout(Duration::from_millis(50));

        assert!(!ctx.is_cancelled());
        sleep(Duration::from_millis(80)).await;
        assert!(ctx.is_cancelled());
    }

    #[tokio::test]
    async fn context_manual_cancel() {
        let ctx = Context::new();

        assert!(!ctx.is_cancelled());
        ctx.cancel();
        assert!(ctx.is_cancelled());
    }

    #[tokio::test]
    async fn parent_cancellation_reaches_children() {
        let root = Context::new();
        let child = root.child();

        root.cancel();
        assert!(child.is_cancelled());

        let result = child.run(sleep(Duration::from_secs(5))).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn run_completes_when_not_cancelled() {
        let ctx = Context::new().child();
        assert_eq!(ctx.run(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn cancel_during_run_aborts_future() {
        let root = Context::new();
        let child = root.child();

        let canceller = root.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let result = child.run(sleep(Duration::from_secs(5))).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn context_deadline() {
        let ctx = Context::new();
        assert!(ctx.deadline().is_none());

        let with_timeout = ctx.with_timeout(Duration::from_secs(1));
        assert!(with_timeout.deadline().is_some());
    }
}
