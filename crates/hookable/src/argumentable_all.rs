use std::fmt;
use std::sync::Arc;

use crate::argumentable::run_handlers;
use crate::chain::{ChainSettings, Next};
use crate::config::HookableConfig;
use crate::error::HookError;
use crate::handler::ArgHandler;

/// Three-list request/response chain.
///
/// `pre`, `actor` and `post` are flattened into one queue in that order at
/// call time; a handler only knows its stage by its position.
pub struct ArgumentableAll<Req, Res> {
    pub pre: Vec<ArgHandler<Req, Res>>,
    pub actor: Vec<ArgHandler<Req, Res>>,
    pub post: Vec<ArgHandler<Req, Res>>,
    settings: ChainSettings,
}

/// Create an empty [`ArgumentableAll`]
pub fn argumentable_all<Req, Res>() -> ArgumentableAll<Req, Res>
where
    Req: Send + Sync + 'static,
    Res: Send + Sync + 'static,
{
    ArgumentableAll::new()
}

impl<Req, Res> ArgumentableAll<Req, Res>
where
    Req: Send + Sync + 'static,
    Res: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_config(HookableConfig::default())
    }

    pub fn with_config(config: HookableConfig) -> Self {
        Self {
            pre: Vec::new(),
            actor: Vec::new(),
            post: Vec::new(),
            settings: ChainSettings::from(&config),
        }
    }

    pub fn name(&self) -> &str {
        &self.settings.label
    }

    pub fn push_pre<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&Req, &Res, Next<()>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.pre.push(Arc::new(handler));
        self
    }

    pub fn push_actor<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&Req, &Res, Next<()>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.actor.push(Arc::new(handler));
        self
    }

    pub fn push_post<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&Req, &Res, Next<()>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.post.push(Arc::new(handler));
        self
    }

    pub fn with_pre<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Req, &Res, Next<()>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.push_pre(handler);
        self
    }

    pub fn with_actor<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Req, &Res, Next<()>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.push_actor(handler);
        self
    }

    pub fn with_post<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Req, &Res, Next<()>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.push_post(handler);
        self
    }

    /// Number of handlers a call would walk
    pub fn len(&self) -> usize {
        self.pre.len() + self.actor.len() + self.post.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn call<F>(&self, req: Req, res: Res, resolve: F)
    where
        F: FnOnce(Result<(), HookError>) + Send + 'static,
    {
        let handlers = self.pre.iter().chain(&self.actor).chain(&self.post);
        run_handlers(&self.settings, handlers, req, res, Box::new(resolve));
    }
}

impl<Req, Res> Default for ArgumentableAll<Req, Res>
where
    Req: Send + Sync + 'static,
    Res: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Req, Res> Clone for ArgumentableAll<Req, Res> {
    fn clone(&self) -> Self {
        Self {
            pre: self.pre.clone(),
            actor: self.actor.clone(),
            post: self.post.clone(),
            settings: self.settings.clone(),
        }
    }
}

impl<Req, Res> fmt::Debug for ArgumentableAll<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentableAll")
            .field("name", &self.settings.label)
            .field("pre", &self.pre.len())
            .field("actor", &self.actor.len())
            .field("post", &self.post.len())
            .finish()
    }
}
