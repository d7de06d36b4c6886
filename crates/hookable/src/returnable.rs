use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::chain::walker::walk;
use crate::chain::{ChainSettings, Next};
use crate::config::HookableConfig;
use crate::deferred::{deferred, Deferred};
use crate::error::HookError;
use crate::handler::Actor;

/// Callable backed by a single actor, no middleware
pub struct Returnable<T, U> {
    pub actor: Option<Actor<T, U>>,
    settings: ChainSettings,
}

/// Create an empty [`Returnable`]; install an actor before calling it
pub fn returnable<T, U>() -> Returnable<T, U>
where
    T: Send + 'static,
    U: Send + 'static,
{
    Returnable::new()
}

impl<T, U> Returnable<T, U>
where
    T: Send + 'static,
    U: Send + 'static,
{
    pub fn new() -> Self {
        Self::with_config(HookableConfig::default())
    }

    pub fn with_config(config: HookableConfig) -> Self {
        Self {
            actor: None,
            settings: ChainSettings::from(&config),
        }
    }

    pub fn name(&self) -> &str {
        &self.settings.label
    }

    pub fn set_actor<F>(&mut self, actor: F) -> &mut Self
    where
        F: Fn(T, Next<U>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.actor = Some(Arc::new(actor));
        self
    }

    pub fn with_actor<F>(mut self, actor: F) -> Self
    where
        F: Fn(T, Next<U>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.set_actor(actor);
        self
    }

    /// Invoke the actor once with `arg`
    pub fn call(&self, arg: T) -> Deferred<U> {
        let (resolver, deferred) = deferred();

        let Some(actor) = self.actor.clone() else {
            warn!(hook = %self.settings.label, "Invoked without an actor");
            resolver.settle(Err(HookError::MissingActor));
            return deferred;
        };

        walk(
            &self.settings,
            Box::new(move |next| actor(arg, next)),
            VecDeque::new(),
            Box::new(move |result| resolver.settle(result)),
        );

        deferred
    }
}

impl<T, U> Default for Returnable<T, U>
where
    T: Send + 'static,
    U: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U> Clone for Returnable<T, U> {
    fn clone(&self) -> Self {
        Self {
            actor: self.actor.clone(),
            settings: self.settings.clone(),
        }
    }
}

impl<T, U> fmt::Debug for Returnable<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Returnable")
            .field("name", &self.settings.label)
            .field("actor", &self.actor.is_some())
            .finish()
    }
}
