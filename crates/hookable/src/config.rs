use serde::{Deserialize, Serialize};

/// Per-callable settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HookableConfig {
    /// Label attached to every log event as the `hook` field
    #[serde(default = "default_name")]
    pub name: String,

    /// Route handler panics to the failure channel instead of unwinding
    #[serde(default = "default_catch_panics")]
    pub catch_panics: bool,
}

fn default_name() -> String {
    "hookable".to_string()
}

fn default_catch_panics() -> bool {
    true
}

impl Default for HookableConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            catch_panics: default_catch_panics(),
        }
    }
}

impl HookableConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
