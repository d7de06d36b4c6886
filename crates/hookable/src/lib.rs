//! Hookable functions.
//!
//! A hookable callable is created empty by one of four factories, given an
//! actor and optional ordered `pre`/`post` handlers, then invoked any number
//! of times. Each invocation snapshots the handler lists and walks them in
//! order; the first error from any handler ends the walk.
//!
//! - [`returnable()`]: actor only, result delivered as a [`Deferred`]
//! - [`returnable_all()`]: pre chain, actor, post chain, result as a [`Deferred`]
//! - [`argumentable()`]: one request/response chain with a completion callback
//! - [`argumentable_all()`]: pre + actor + post flattened into one such chain

pub mod argumentable;
pub mod argumentable_all;
pub mod chain;
pub mod config;
pub mod deferred;
pub mod error;
pub mod handler;
pub mod returnable;
pub mod returnable_all;

pub use argumentable::{argumentable, Argumentable};
pub use argumentable_all::{argumentable_all, ArgumentableAll};
pub use chain::Next;
pub use config::HookableConfig;
pub use deferred::Deferred;
pub use error::HookError;
pub use handler::{Actor, ArgHandler, Completion, PostHandler, PreHandler};
pub use returnable::{returnable, Returnable};
pub use returnable_all::{returnable_all, ReturnableAll};

/// Initialize structured JSON logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}
