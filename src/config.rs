//! Environment configuration for the AI service

use std::time::Duration;

use anyhow::{Context, Result, bail};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
const MODEL_VAR: &str = "RECIPE_MODEL";
const API_BASE_VAR: &str = "GEMINI_API_BASE";
const TIMEOUT_VAR: &str = "RECIPE_REQUEST_TIMEOUT_SECS";

#[derive(Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub request_timeout: Option<Duration>,
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl AiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = API_KEY_VARS
            .iter()
            .find_map(|key| non_blank(*key))
            .with_context(|| format!("missing API key: set {}", API_KEY_VARS.join(" or ")))?;

        let request_timeout = match non_blank(TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{} must be a whole number of seconds, got {:?}", TIMEOUT_VAR, raw))?;
                if secs == 0 {
                    bail!("{} must be greater than zero", TIMEOUT_VAR);
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_key: api_key.trim().to_string(),
            model: non_blank(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: non_blank(API_BASE_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            request_timeout,
        })
    }
}
