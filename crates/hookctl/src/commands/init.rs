use anyhow::Result;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# hookctl pipeline
[hookable]
name = "pipeline"
catch_panics = true

[pipeline]
pre = ["trim", "reject-empty"]
actor = "uppercase"
post = ["suffix:!"]
"#;

/// Write a sample pipeline config
pub fn run_init(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Config already exists at {:?}", path);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, DEFAULT_CONFIG)?;
    println!("Created config at {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.hookable.name, "pipeline");
        assert!(config.pipeline.stages().is_ok());
    }
}
