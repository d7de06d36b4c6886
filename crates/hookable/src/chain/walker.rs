use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace, warn};

use super::next::Next;
use super::ChainSettings;
use crate::error::HookError;

/// Queued handler: receives the current payload and its continuation
pub(crate) type Step<P> = Box<dyn FnOnce(P, Next<P>) -> anyhow::Result<()> + Send>;

/// First step of a walk: produces the initial payload through its continuation
pub(crate) type Entry<P> = Box<dyn FnOnce(Next<P>) -> anyhow::Result<()> + Send>;

/// Terminal delivery, called at most once per walk
pub(crate) type Finish<P> = Box<dyn FnOnce(Result<P, HookError>) + Send>;

/// Entry that seeds the walk with an already known payload
pub(crate) fn seed<P: Send + 'static>(payload: P) -> Entry<P> {
    Box::new(move |next| {
        next.proceed(payload);
        Ok(())
    })
}

/// Start a walk on the caller's stack.
///
/// Runs synchronously until the chain finishes or a handler defers its
/// continuation; in the latter case the walk resumes on whichever thread
/// eventually calls that continuation.
pub(crate) fn walk<P: Send + 'static>(
    settings: &ChainSettings,
    entry: Entry<P>,
    steps: VecDeque<Step<P>>,
    finish: Finish<P>,
) {
    trace!(hook = %settings.label, steps = steps.len(), "starting chain");
    let shared = Arc::new(Shared {
        frame: Mutex::new(Frame {
            queue: steps,
            pending: None,
            driving: true,
            finish: Some(finish),
        }),
        settings: settings.clone(),
    });
    shared.drive(entry);
}

enum Outcome<P> {
    Continue(Entry<P>),
    Fail(HookError),
    Done(P),
}

struct Frame<P> {
    queue: VecDeque<Step<P>>,
    /// Signal received while the driver loop is on the stack
    pending: Option<Result<P, HookError>>,
    /// True while some thread is inside `drive`
    driving: bool,
    /// `None` once the walk has settled
    finish: Option<Finish<P>>,
}

impl<P: Send + 'static> Frame<P> {
    fn advance(&mut self, signal: Result<P, HookError>) -> Outcome<P> {
        match signal {
            Err(e) => Outcome::Fail(e),
            Ok(payload) => match self.queue.pop_front() {
                Some(step) => Outcome::Continue(Box::new(move |next: Next<P>| step(payload, next))),
                None => Outcome::Done(payload),
            },
        }
    }

    fn take_finish(&mut self) -> Option<Finish<P>> {
        self.driving = false;
        self.queue.clear();
        self.finish.take()
    }
}

struct Shared<P> {
    frame: Mutex<Frame<P>>,
    settings: ChainSettings,
}

impl<P: Send + 'static> Shared<P> {
    fn lock(&self) -> MutexGuard<'_, Frame<P>> {
        self.frame.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn continuation(self: &Arc<Self>) -> Next<P> {
        let shared = Arc::clone(self);
        Next::from_sink(move |signal| shared.deliver(signal))
    }

    /// Continuation entry point
    fn deliver(self: &Arc<Self>, signal: Result<P, HookError>) {
        let mut frame = self.lock();
        if frame.finish.is_none() {
            trace!(hook = %self.settings.label, "signal after chain settled; ignored");
            return;
        }
        if frame.driving {
            frame.pending = Some(signal);
            return;
        }
        let outcome = frame.advance(signal);
        match outcome {
            Outcome::Continue(entry) => {
                frame.driving = true;
                drop(frame);
                self.drive(entry);
            }
            Outcome::Done(payload) => self.settle(frame, Ok(payload)),
            Outcome::Fail(err) => self.settle(frame, Err(err)),
        }
    }

    fn drive(self: &Arc<Self>, mut entry: Entry<P>) {
        loop {
            let returned = self.invoke(entry);

            let mut frame = self.lock();
            let signal = match (frame.pending.take(), returned) {
                (Some(signal), Ok(())) => signal,
                (Some(signal), Err(late)) => {
                    warn!(
                        hook = %self.settings.label,
                        error = %late,
                        "Handler failed after calling its continuation; error ignored"
                    );
                    signal
                }
                (None, Err(e)) => Err(e),
                (None, Ok(())) => {
                    frame.driving = false;
                    trace!(hook = %self.settings.label, "handler deferred its continuation");
                    return;
                }
            };

            let outcome = frame.advance(signal);
            match outcome {
                Outcome::Continue(step) => {
                    trace!(
                        hook = %self.settings.label,
                        remaining = frame.queue.len(),
                        "advancing chain"
                    );
                    entry = step;
                }
                Outcome::Done(payload) => return self.settle(frame, Ok(payload)),
                Outcome::Fail(err) => return self.settle(frame, Err(err)),
            }
        }
    }

    fn invoke(self: &Arc<Self>, entry: Entry<P>) -> Result<(), HookError> {
        let next = self.continuation();

        if !self.settings.catch_panics {
            return entry(next).map_err(HookError::Handler);
        }

        match panic::catch_unwind(AssertUnwindSafe(move || entry(next))) {
            Ok(result) => result.map_err(HookError::Handler),
            Err(payload) => {
                let err = HookError::from_panic(payload);
                warn!(hook = %self.settings.label, error = %err, "Handler panicked");
                Err(err)
            }
        }
    }

    /// Deliver the terminal result; the frame lock is released first
    fn settle(&self, mut frame: MutexGuard<'_, Frame<P>>, result: Result<P, HookError>) {
        let finish = frame.take_finish();
        drop(frame);
        let Some(finish) = finish else {
            return;
        };
        match &result {
            Ok(_) => debug!(hook = %self.settings.label, "chain completed"),
            Err(err) => debug!(hook = %self.settings.label, error = %err, "chain failed"),
        }
        finish(result);
    }
}
