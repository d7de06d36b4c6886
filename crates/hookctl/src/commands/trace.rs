use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use hookable::{ArgumentableAll, Next};
use serde::Serialize;
use tracing::info;

use crate::config::{Config, Stages};
use crate::transforms::Transform;

/// Shared response every handler in the chain writes to
#[derive(Debug, Default, Serialize)]
pub struct TraceLog {
    pub body: String,
    pub steps: Vec<String>,
}

pub type Response = Arc<Mutex<TraceLog>>;

type Chain = ArgumentableAll<String, Response>;

fn step(
    stage: &'static str,
    transform: Transform,
) -> impl Fn(&String, &Response, Next<()>) -> Result<()> + Send + Sync + 'static {
    move |_req, res, next| {
        let mut log = res.lock().unwrap_or_else(|e| e.into_inner());
        let body = transform.apply(&log.body)?;
        log.steps.push(format!("{}:{} -> {:?}", stage, transform, body));
        log.body = body;
        drop(log);
        next.resume();
        Ok(())
    }
}

/// Every stage rewrites the shared response body in place.
pub fn build(config: &Config, stages: Stages) -> Chain {
    let mut f = Chain::with_config(config.hookable.clone());
    for transform in stages.pre {
        f.push_pre(step("pre", transform));
    }
    f.push_actor(step("actor", stages.actor));
    for transform in stages.post {
        f.push_post(step("post", transform));
    }
    f
}

pub async fn execute(input: String, as_json: bool, config: &Config) -> Result<()> {
    let stages = config.pipeline.stages()?;
    let chain = build(config, stages);
    info!(hook = chain.name(), handlers = chain.len(), "Tracing pipeline");

    let response: Response = Arc::new(Mutex::new(TraceLog {
        body: input.clone(),
        steps: Vec::new(),
    }));
    let (tx, rx) = tokio::sync::oneshot::channel();
    chain.call(input, Arc::clone(&response), move |result| {
        let _ = tx.send(result);
    });
    let outcome = rx.await.context("Chain stalled without completing")?;

    let log = response.lock().unwrap_or_else(|e| e.into_inner());
    if as_json {
        println!("{}", serde_json::to_string(&*log)?);
    } else {
        for line in &log.steps {
            println!("{}", line);
        }
        println!("{}", log.body);
    }
    drop(log);

    outcome.context("Chain failed")?;
    Ok(())
}
