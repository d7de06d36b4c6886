use anyhow::{Context, Result};
use hookable::ReturnableAll;
use serde_json::json;
use tracing::info;

use crate::config::{Config, Stages};

/// Pre transforms rewrite the argument, the actor produces the result and
/// post transforms rewrite the result.
pub fn build(config: &Config, stages: Stages) -> ReturnableAll<String, String> {
    let mut f: ReturnableAll<String, String> = ReturnableAll::with_config(config.hookable.clone());

    for transform in stages.pre {
        f.push_pre(move |arg, next| {
            next.proceed(transform.apply(&arg)?);
            Ok(())
        });
    }

    let actor = stages.actor;
    f.set_actor(move |arg, next| {
        next.proceed(actor.apply(&arg)?);
        Ok(())
    });

    for transform in stages.post {
        f.push_post(move |arg, result, next| {
            let result = transform.apply(&result)?;
            next.proceed((arg, result));
            Ok(())
        });
    }

    f
}

pub async fn execute(input: String, as_json: bool, config: &Config) -> Result<()> {
    let stages = config.pipeline.stages()?;
    let pipeline = build(config, stages);
    info!(hook = pipeline.name(), "Running pipeline");

    let output = pipeline
        .call(input.clone())
        .await
        .context("Pipeline rejected input")?;

    if as_json {
        println!("{}", json!({ "input": input, "output": output }));
    } else {
        println!("{}", output);
    }
    Ok(())
}
