//! Built-in string transforms usable at any pipeline stage.

use anyhow::{bail, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    Echo,
    Trim,
    Lowercase,
    Uppercase,
    Reverse,
    RejectEmpty,
    Prefix(String),
    Suffix(String),
}

/// Name and description of every transform, for `hookctl list`
pub const CATALOG: &[(&str, &str)] = &[
    ("echo", "pass the input through unchanged"),
    ("trim", "strip leading and trailing whitespace"),
    ("lowercase", "convert to lowercase"),
    ("uppercase", "convert to uppercase"),
    ("reverse", "reverse the characters"),
    ("reject-empty", "fail the chain if the input is empty"),
    ("prefix:<text>", "prepend <text>"),
    ("suffix:<text>", "append <text>"),
];

impl Transform {
    pub fn apply(&self, input: &str) -> Result<String> {
        Ok(match self {
            Transform::Echo => input.to_string(),
            Transform::Trim => input.trim().to_string(),
            Transform::Lowercase => input.to_lowercase(),
            Transform::Uppercase => input.to_uppercase(),
            Transform::Reverse => input.chars().rev().collect(),
            Transform::RejectEmpty => {
                if input.is_empty() {
                    bail!("input is empty");
                }
                input.to_string()
            }
            Transform::Prefix(text) => format!("{}{}", text, input),
            Transform::Suffix(text) => format!("{}{}", input, text),
        })
    }
}

impl FromStr for Transform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(text) = s.strip_prefix("prefix:") {
            return Ok(Transform::Prefix(text.to_string()));
        }
        if let Some(text) = s.strip_prefix("suffix:") {
            return Ok(Transform::Suffix(text.to_string()));
        }
        match s {
            "echo" => Ok(Transform::Echo),
            "trim" => Ok(Transform::Trim),
            "lowercase" => Ok(Transform::Lowercase),
            "uppercase" => Ok(Transform::Uppercase),
            "reverse" => Ok(Transform::Reverse),
            "reject-empty" => Ok(Transform::RejectEmpty),
            other => bail!("Unknown transform '{}'", other),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Echo => write!(f, "echo"),
            Transform::Trim => write!(f, "trim"),
            Transform::Lowercase => write!(f, "lowercase"),
            Transform::Uppercase => write!(f, "uppercase"),
            Transform::Reverse => write!(f, "reverse"),
            Transform::RejectEmpty => write!(f, "reject-empty"),
            Transform::Prefix(text) => write!(f, "prefix:{}", text),
            Transform::Suffix(text) => write!(f, "suffix:{}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_agree() {
        for name in ["echo", "trim", "reverse", "reject-empty", "prefix:>> ", "suffix:!"] {
            let transform: Transform = name.parse().unwrap();
            assert_eq!(transform.to_string(), name);
        }
    }

    #[test]
    fn test_apply() {
        assert_eq!(Transform::Trim.apply("  hi ").unwrap(), "hi");
        assert_eq!(Transform::Reverse.apply("abc").unwrap(), "cba");
        assert_eq!(Transform::Prefix("> ".into()).apply("x").unwrap(), "> x");
        assert!(Transform::RejectEmpty.apply("").is_err());
    }

    #[test]
    fn test_unknown_name() {
        let err = "shuffle".parse::<Transform>().unwrap_err();
        assert!(err.to_string().contains("shuffle"));
    }
}
