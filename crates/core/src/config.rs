use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_SOURCE_LANG: &str = "auto";
pub const DEFAULT_TARGET_LANG: &str = "en";
pub const ENV_SOURCE_LANG: &str = "TEXTLENS_SOURCE_LANG";
pub const ENV_TARGET_LANG: &str = "TEXTLENS_TARGET_LANG";
pub const ENV_ENDPOINTS: &str = "TEXTLENS_ENDPOINTS";
pub const ENV_HISTORY_FILE: &str = "TEXTLENS_HISTORY_FILE";

/// Source-language hint forwarded to providers, either an ISO code or the
/// literal "auto" for provider-side detection.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceLang(String);

impl SourceLang {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, ConfigError> {
        let v = value.into();
        if v.trim().is_empty() {
            return Err(ConfigError::EmptySourceLang);
        }
        Ok(Self(v))
    }

    pub fn auto() -> Self {
        Self(DEFAULT_SOURCE_LANG.to_owned())
    }

    pub fn is_auto(&self) -> bool {
        self.0 == DEFAULT_SOURCE_LANG
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SourceLang {
    fn default() -> Self {
        Self::auto()
    }
}

impl fmt::Display for SourceLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetLang(String);

impl TargetLang {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, ConfigError> {
        let v = value.into();
        if v.trim().is_empty() {
            return Err(ConfigError::EmptyTargetLang);
        }
        Ok(Self(v))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TargetLang {
    fn default() -> Self {
        Self(DEFAULT_TARGET_LANG.to_owned())
    }
}

impl fmt::Display for TargetLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("source language must not be empty")]
    EmptySourceLang,
    #[error("target language must not be empty")]
    EmptyTargetLang,
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn resolve_string_with_default(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
    default: &str,
) -> String {
    match cli_value {
        Some(v) => v,
        None => env.var(env_key).unwrap_or_else(|| default.to_owned()),
    }
}

pub fn resolve_optional_string(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
) -> Option<String> {
    match cli_value {
        Some(v) => Some(v),
        None => env.var(env_key),
    }
}
