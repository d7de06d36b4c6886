use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use crate::chain::walker::{seed, walk, Step};
use crate::chain::{ChainSettings, Next};
use crate::config::HookableConfig;
use crate::error::HookError;
use crate::handler::{ArgHandler, Completion};

/// Single-stage request/response chain with callback completion
pub struct Argumentable<Req, Res> {
    pub actor: Vec<ArgHandler<Req, Res>>,
    settings: ChainSettings,
}

/// Create an empty [`Argumentable`]
pub fn argumentable<Req, Res>() -> Argumentable<Req, Res>
where
    Req: Send + Sync + 'static,
    Res: Send + Sync + 'static,
{
    Argumentable::new()
}

/// Walk `handlers` in order against a shared request and response.
///
/// `resolve` receives `Ok(())` once every handler resumed, or the first error.
pub(crate) fn run_handlers<'a, Req, Res, I>(
    settings: &ChainSettings,
    handlers: I,
    req: Req,
    res: Res,
    resolve: Completion,
) where
    Req: Send + Sync + 'static,
    Res: Send + Sync + 'static,
    I: IntoIterator<Item = &'a ArgHandler<Req, Res>>,
{
    let req = Arc::new(req);
    let res = Arc::new(res);
    let steps: VecDeque<Step<()>> = handlers
        .into_iter()
        .map(|handler| -> Step<()> {
            let handler = Arc::clone(handler);
            let req = Arc::clone(&req);
            let res = Arc::clone(&res);
            Box::new(move |(), next: Next<()>| handler(&*req, &*res, next))
        })
        .collect();

    walk(settings, seed(()), steps, resolve);
}

impl<Req, Res> Argumentable<Req, Res>
where
    Req: Send + Sync + 'static,
    Res: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_config(HookableConfig::default())
    }

    pub fn with_config(config: HookableConfig) -> Self {
        Self {
            actor: Vec::new(),
            settings: ChainSettings::from(&config),
        }
    }

    pub fn name(&self) -> &str {
        &self.settings.label
    }

    pub fn push_actor<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&Req, &Res, Next<()>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.actor.push(Arc::new(handler));
        self
    }

    pub fn with_actor<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Req, &Res, Next<()>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.push_actor(handler);
        self
    }

    /// Walk the actor list; `resolve` fires exactly once unless a handler stalls
    pub fn call<F>(&self, req: Req, res: Res, resolve: F)
    where
        F: FnOnce(Result<(), HookError>) + Send + 'static,
    {
        run_handlers(&self.settings, &self.actor, req, res, Box::new(resolve));
    }
}

impl<Req, Res> Default for Argumentable<Req, Res>
where
    Req: Send + Sync + 'static,
    Res: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Req, Res> Clone for Argumentable<Req, Res> {
    fn clone(&self) -> Self {
        Self {
            actor: self.actor.clone(),
            settings: self.settings.clone(),
        }
    }
}

impl<Req, Res> fmt::Debug for Argumentable<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argumentable")
            .field("name", &self.settings.label)
            .field("actor", &self.actor.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::mpsc;
    use std::sync::Mutex;

    type Response = Mutex<Vec<String>>;

    fn completion() -> (
        impl FnOnce(Result<(), HookError>) + Send + 'static,
        mpsc::Receiver<Result<(), HookError>>,
    ) {
        let (tx, rx) = mpsc::channel();
        (move |result| tx.send(result).unwrap(), rx)
    }

    fn tagger(tag: &'static str) -> impl Fn(&String, &Arc<Response>, Next<()>) -> anyhow::Result<()> {
        move |req, res, next| {
            res.lock().unwrap().push(format!("{}:{}", tag, req));
            next.resume();
            Ok(())
        }
    }

    #[test]
    fn test_empty_chain_resolves_once() {
        let f = argumentable::<(), ()>();
        let (done, rx) = completion();
        f.call((), (), done);
        assert!(rx.try_recv().unwrap().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_handlers_share_request_and_response() {
        let f = argumentable::<String, Arc<Response>>()
            .with_actor(tagger("a"))
            .with_actor(tagger("b"));
        let response = Arc::new(Mutex::new(Vec::new()));
        let (done, rx) = completion();

        f.call("req".to_string(), Arc::clone(&response), done);

        assert!(rx.try_recv().unwrap().is_ok());
        assert_eq!(*response.lock().unwrap(), vec!["a:req", "b:req"]);
    }

    #[test]
    fn test_error_stops_chain() {
        let f = argumentable::<String, Arc<Response>>()
            .with_actor(tagger("a"))
            .with_actor(|_, _, next| {
                next.fail(anyhow!("halt"));
                Ok(())
            })
            .with_actor(tagger("c"));
        let response = Arc::new(Mutex::new(Vec::new()));
        let (done, rx) = completion();

        f.call("req".to_string(), Arc::clone(&response), done);

        assert_eq!(rx.try_recv().unwrap().unwrap_err().to_string(), "halt");
        assert_eq!(*response.lock().unwrap(), vec!["a:req"]);
    }

    #[test]
    fn test_thrown_error_reaches_completion() {
        let f = argumentable::<(), ()>().with_actor(|_, _, _next| Err(anyhow!("thrown")));
        let (done, rx) = completion();
        f.call((), (), done);
        assert_eq!(rx.try_recv().unwrap().unwrap_err().to_string(), "thrown");
    }
}
