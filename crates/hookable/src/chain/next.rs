use std::fmt;

use crate::error::HookError;

type Sink<P> = Box<dyn FnOnce(Result<P, HookError>) + Send>;

/// Continuation handed to every handler.
///
/// A handler signals its own completion by consuming its `Next`, either
/// immediately or later from another task. Dropping it without calling it
/// stalls the chain.
pub struct Next<P> {
    sink: Sink<P>,
}

impl<P: Send + 'static> Next<P> {
    pub(crate) fn from_sink<F>(sink: F) -> Self
    where
        F: FnOnce(Result<P, HookError>) + Send + 'static,
    {
        Self {
            sink: Box::new(sink),
        }
    }

    /// Advance the chain with `payload`
    pub fn proceed(self, payload: P) {
        (self.sink)(Ok(payload));
    }

    /// Abort the chain; remaining handlers are skipped
    pub fn fail<E>(self, err: E)
    where
        E: Into<anyhow::Error>,
    {
        (self.sink)(Err(HookError::Handler(err.into())));
    }

    /// Advance on `Ok`, abort on `Err`
    pub fn settle(self, result: anyhow::Result<P>) {
        match result {
            Ok(payload) => self.proceed(payload),
            Err(e) => self.fail(e),
        }
    }

    /// Adapt into a continuation for a different payload type
    pub fn map<Q, F>(self, f: F) -> Next<Q>
    where
        Q: Send + 'static,
        F: FnOnce(Q) -> P + Send + 'static,
    {
        let sink = self.sink;
        Next::from_sink(move |result: Result<Q, HookError>| sink(result.map(f)))
    }
}

impl Next<()> {
    /// Success with no payload, for request/response chains
    pub fn resume(self) {
        self.proceed(());
    }
}

impl<P> fmt::Debug for Next<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::{Arc, Mutex};

    fn capture<P: Send + 'static>() -> (Next<P>, Arc<Mutex<Option<Result<P, HookError>>>>) {
        let slot = Arc::new(Mutex::new(None));
        let sink_slot = Arc::clone(&slot);
        let next = Next::from_sink(move |r| {
            *sink_slot.lock().unwrap() = Some(r);
        });
        (next, slot)
    }

    #[test]
    fn test_proceed_delivers_payload() {
        let (next, slot) = capture::<u32>();
        next.proceed(5);
        assert!(matches!(slot.lock().unwrap().take(), Some(Ok(5))));
    }

    #[test]
    fn test_fail_wraps_handler_error() {
        let (next, slot) = capture::<u32>();
        next.fail(anyhow!("nope"));
        let delivered = slot.lock().unwrap().take().unwrap();
        assert_eq!(delivered.unwrap_err().to_string(), "nope");
    }

    #[test]
    fn test_settle_matches_proceed_and_fail() {
        let (next, slot) = capture::<&'static str>();
        next.settle(Ok("ok"));
        assert!(matches!(slot.lock().unwrap().take(), Some(Ok("ok"))));

        let (next, slot) = capture::<&'static str>();
        next.settle(Err(anyhow!("bad")));
        assert!(matches!(
            slot.lock().unwrap().take(),
            Some(Err(HookError::Handler(_)))
        ));
    }

    #[test]
    fn test_map_joins_payloads() {
        let (next, slot) = capture::<(String, usize)>();
        let mapped: Next<usize> = next.map(|n| ("len".to_string(), n));
        mapped.proceed(3);
        let (label, n) = slot.lock().unwrap().take().unwrap().unwrap();
        assert_eq!(label, "len");
        assert_eq!(n, 3);
    }

    #[test]
    fn test_map_passes_errors_through() {
        let (next, slot) = capture::<(u8, u8)>();
        let mapped: Next<u8> = next.map(|n| (n, n));
        mapped.fail(anyhow!("early"));
        assert!(slot.lock().unwrap().take().unwrap().is_err());
    }
}
