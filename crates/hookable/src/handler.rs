//! Handler shapes accepted by the hookable callables.

use std::sync::Arc;

use anyhow::Result;

use crate::chain::Next;
use crate::error::HookError;

/// Transforms the argument before the actor runs: `next.proceed(arg)`
pub type PreHandler<T> = Arc<dyn Fn(T, Next<T>) -> Result<()> + Send + Sync>;

/// Produces the result from the argument: `next.proceed(result)`
pub type Actor<T, U> = Arc<dyn Fn(T, Next<U>) -> Result<()> + Send + Sync>;

/// Sees the argument and the result: `next.proceed((arg, result))`
pub type PostHandler<T, U> = Arc<dyn Fn(T, U, Next<(T, U)>) -> Result<()> + Send + Sync>;

/// Request/response handler: `next.resume()` or `next.fail(err)`
pub type ArgHandler<Req, Res> = Arc<dyn Fn(&Req, &Res, Next<()>) -> Result<()> + Send + Sync>;

/// Completion callback for request/response callables
pub type Completion = Box<dyn FnOnce(std::result::Result<(), HookError>) + Send>;
