use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::chain::walker::{seed, walk, Step};
use crate::chain::{ChainSettings, Next};
use crate::config::HookableConfig;
use crate::deferred::{deferred, Deferred};
use crate::error::HookError;
use crate::handler::{Actor, PostHandler, PreHandler};

/// Three-stage callable: pre chain, actor, post chain.
///
/// Pre handlers may rewrite the argument; the actor turns it into a result;
/// post handlers see the rewritten argument and may rewrite the result. The
/// first failure at any stage rejects the returned [`Deferred`].
pub struct ReturnableAll<T, U> {
    pub pre: Vec<PreHandler<T>>,
    pub actor: Option<Actor<T, U>>,
    pub post: Vec<PostHandler<T, U>>,
    settings: ChainSettings,
}

/// Create an empty [`ReturnableAll`]; install an actor before calling it
pub fn returnable_all<T, U>() -> ReturnableAll<T, U>
where
    T: Clone + Send + 'static,
    U: Send + 'static,
{
    ReturnableAll::new()
}

impl<T, U> ReturnableAll<T, U>
where
    T: Clone + Send + 'static,
    U: Send + 'static,
{
    pub fn new() -> Self {
        Self::with_config(HookableConfig::default())
    }

    pub fn with_config(config: HookableConfig) -> Self {
        Self {
            pre: Vec::new(),
            actor: None,
            post: Vec::new(),
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

    pub fn push_pre<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(T, Next<T>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.pre.push(Arc::new(handler));
        self
    }

    pub fn push_post<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(T, U, Next<(T, U)>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.post.push(Arc::new(handler));
        self
    }

    pub fn with_actor<F>(mut self, actor: F) -> Self
    where
        F: Fn(T, Next<U>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.set_actor(actor);
        self
    }

    pub fn with_pre<F>(mut self, handler: F) -> Self
    where
        F: Fn(T, Next<T>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.push_pre(handler);
        self
    }

    pub fn with_post<F>(mut self, handler: F) -> Self
    where
        F: Fn(T, U, Next<(T, U)>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.push_post(handler);
        self
    }

    /// Run pre handlers, the actor, then post handlers against `arg`.
    ///
    /// Without an actor the call rejects with [`HookError::MissingActor`]
    /// once the pre stage completes.
    pub fn call(&self, arg: T) -> Deferred<U> {
        let (resolver, deferred) = deferred();

        // Snapshot both stages now so later edits only affect later calls.
        let pre_steps: VecDeque<Step<T>> = self
            .pre
            .iter()
            .cloned()
            .map(|handler| -> Step<T> { Box::new(move |arg: T, next: Next<T>| handler(arg, next)) })
            .collect();
        let post_steps: VecDeque<Step<(T, U)>> = self
            .post
            .iter()
            .cloned()
            .map(|handler| -> Step<(T, U)> {
                Box::new(move |(arg, result): (T, U), next: Next<(T, U)>| {
                    handler(arg, result, next)
                })
            })
            .collect();

        let actor = self.actor.clone();
        let post_settings = self.settings.clone();
        walk(
            &self.settings,
            seed(arg),
            pre_steps,
            Box::new(move |pre_result: Result<T, HookError>| {
                let arg = match pre_result {
                    Ok(arg) => arg,
                    Err(e) => return resolver.settle(Err(e)),
                };
                // Pre handlers have already run when a missing actor is noticed.
                let Some(actor) = actor else {
                    warn!(hook = %post_settings.label, "Invoked without an actor");
                    return resolver.settle(Err(HookError::MissingActor));
                };
                let actor_arg = arg.clone();
                walk(
                    &post_settings,
                    Box::new(move |next: Next<(T, U)>| {
                        actor(actor_arg, next.map(move |result| (arg, result)))
                    }),
                    post_steps,
                    Box::new(move |post_result| {
                        resolver.settle(post_result.map(|(_, result)| result))
                    }),
                );
            }),
        );

        deferred
    }
}

impl<T, U> Default for ReturnableAll<T, U>
where
    T: Clone + Send + 'static,
    U: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U> Clone for ReturnableAll<T, U> {
    fn clone(&self) -> Self {
        Self {
            pre: self.pre.clone(),
            actor: self.actor.clone(),
            post: self.post.clone(),
            settings: self.settings.clone(),
        }
    }
}

impl<T, U> fmt::Debug for ReturnableAll<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReturnableAll")
            .field("name", &self.settings.label)
            .field("pre", &self.pre.len())
            .field("actor", &self.actor.is_some())
            .field("post", &self.post.len())
            .finish()
    }
}
