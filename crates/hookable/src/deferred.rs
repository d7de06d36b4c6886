use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::error::HookError;

/// Result of a promise-style invocation, resolved or rejected exactly once.
///
/// Resolves to [`HookError::Abandoned`] if the chain can no longer finish
/// because every outstanding continuation was dropped, or if the outcome was
/// already taken by [`Deferred::try_take`] or an earlier poll.
#[derive(Debug)]
#[must_use = "a Deferred does nothing unless awaited or polled"]
pub struct Deferred<U> {
    /// `None` once an outcome has been delivered
    rx: Option<oneshot::Receiver<Result<U, HookError>>>,
}

/// Sending half owned by the walk
pub(crate) struct Resolver<U> {
    tx: oneshot::Sender<Result<U, HookError>>,
}

pub(crate) fn deferred<U>() -> (Resolver<U>, Deferred<U>) {
    let (tx, rx) = oneshot::channel();
    (Resolver { tx }, Deferred { rx: Some(rx) })
}

impl<U> Resolver<U> {
    pub(crate) fn settle(self, result: Result<U, HookError>) {
        // Receiver gone means nobody is waiting on the outcome.
        let _ = self.tx.send(result);
    }
}

impl<U> Deferred<U> {
    /// Take the outcome if it is already available.
    ///
    /// Returns `None` while the chain is still running. Once an outcome has
    /// been taken, later calls report [`HookError::Abandoned`].
    pub fn try_take(&mut self) -> Option<Result<U, HookError>> {
        let Some(rx) = self.rx.as_mut() else {
            return Some(Err(HookError::Abandoned));
        };
        let outcome = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => Err(HookError::Abandoned),
        };
        self.rx = None;
        Some(outcome)
    }
}

impl<U> Future for Deferred<U> {
    type Output = Result<U, HookError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let Some(rx) = this.rx.as_mut() else {
            return Poll::Ready(Err(HookError::Abandoned));
        };
        let received = match Pin::new(rx).poll(cx) {
            Poll::Ready(received) => received,
            Poll::Pending => return Poll::Pending,
        };
        this.rx = None;
        Poll::Ready(received.unwrap_or(Err(HookError::Abandoned)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[tokio::test]
    async fn test_resolves_with_value() {
        let (resolver, deferred) = deferred::<u32>();
        resolver.settle(Ok(42));
        assert_eq!(deferred.await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_rejects_with_error() {
        let (resolver, deferred) = deferred::<u32>();
        resolver.settle(Err(HookError::from(anyhow!("rejected"))));
        assert_eq!(deferred.await.unwrap_err().to_string(), "rejected");
    }

    #[tokio::test]
    async fn test_dropped_resolver_is_abandoned() {
        let (resolver, deferred) = deferred::<u32>();
        drop(resolver);
        assert!(matches!(deferred.await, Err(HookError::Abandoned)));
    }

    #[test]
    fn test_try_take_before_and_after() {
        let (resolver, mut deferred) = deferred::<&'static str>();
        assert!(deferred.try_take().is_none());
        resolver.settle(Ok("done"));
        assert_eq!(deferred.try_take().unwrap().unwrap(), "done");
        assert!(matches!(deferred.try_take(), Some(Err(HookError::Abandoned))));
    }

    #[tokio::test]
    async fn test_await_after_try_take_is_abandoned() {
        let (resolver, mut deferred) = deferred::<u32>();
        resolver.settle(Ok(9));
        assert_eq!(deferred.try_take().unwrap().unwrap(), 9);
        assert!(matches!(deferred.await, Err(HookError::Abandoned)));
    }

    #[tokio::test]
    async fn test_try_take_after_poll_is_abandoned() {
        let (resolver, mut deferred) = deferred::<u32>();
        resolver.settle(Ok(3));
        assert_eq!((&mut deferred).await.unwrap(), 3);
        assert!(matches!(deferred.try_take(), Some(Err(HookError::Abandoned))));
        assert!(matches!(deferred.await, Err(HookError::Abandoned)));
    }
}
