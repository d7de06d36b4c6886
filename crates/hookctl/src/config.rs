use anyhow::{Context, Result};
use hookable::HookableConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::transforms::Transform;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub hookable: HookableConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PipelineConfig {
    #[serde(default = "default_pre")]
    pub pre: Vec<String>,

    #[serde(default = "default_actor")]
    pub actor: String,

    #[serde(default)]
    pub post: Vec<String>,
}

fn default_pre() -> Vec<String> {
    vec!["trim".to_string()]
}

fn default_actor() -> String {
    "echo".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pre: default_pre(),
            actor: default_actor(),
            post: Vec::new(),
        }
    }
}

/// Pipeline with every transform name resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stages {
    pub pre: Vec<Transform>,
    pub actor: Transform,
    pub post: Vec<Transform>,
}

impl PipelineConfig {
    pub fn stages(&self) -> Result<Stages> {
        Ok(Stages {
            pre: parse_all(&self.pre).context("Invalid pipeline.pre")?,
            actor: self.actor.parse().context("Invalid pipeline.actor")?,
            post: parse_all(&self.post).context("Invalid pipeline.post")?,
        })
    }
}

fn parse_all(names: &[String]) -> Result<Vec<Transform>> {
    names.iter().map(|name| name.parse()).collect()
}

/// Load config from file or use defaults
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let content =
        fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
    let config: Config = toml::from_str(&content).context("Failed to parse TOML config")?;
    Ok(config)
}
