//! Chain walking: sequential invocation of a per-call queue of handlers.
//!
//! Every hookable callable reduces to one or more walks. A walk starts with an
//! entry step, then pops steps off the front of its queue, handing each the
//! current payload and a fresh [`Next`]. The walk ends when a step fails or the
//! queue is exhausted, and the terminal result is delivered exactly once.

pub mod next;
pub(crate) mod walker;

pub use next::Next;

use std::sync::Arc;

use crate::config::HookableConfig;

/// Settings copied into every frame a callable starts
#[derive(Debug, Clone)]
pub(crate) struct ChainSettings {
    pub label: Arc<str>,
    pub catch_panics: bool,
}

impl From<&HookableConfig> for ChainSettings {
    fn from(config: &HookableConfig) -> Self {
        Self {
            label: Arc::from(config.name.as_str()),
            catch_panics: config.catch_panics,
        }
    }
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self::from(&HookableConfig::default())
    }
}
