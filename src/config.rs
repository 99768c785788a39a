use std::{fmt, str::FromStr};

use anyhow::Context;

use crate::meal_slots::MealSlots;

#[derive(Clone)]
pub struct GenerationConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-3.5-turbo".into(),
            temperature: 0.7,
            max_tokens: 4000,
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub generation: GenerationConfig,
    pub meal_slots: MealSlots,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = var("DATABASE_URL").context("DATABASE_URL is not set")?;

        let defaults = GenerationConfig::default();
        let generation = GenerationConfig {
            api_key: var("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()),
            base_url: var("OPENAI_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            model: var("OPENAI_MODEL").unwrap_or(defaults.model),
            temperature: parse_or(&var, "GENERATION_TEMPERATURE", defaults.temperature),
            max_tokens: parse_or(&var, "GENERATION_MAX_TOKENS", defaults.max_tokens),
            timeout_secs: parse_or(&var, "GENERATION_TIMEOUT_SECS", defaults.timeout_secs),
        };

        let meal_slots = match var("MEAL_TYPES") {
            Some(list) => MealSlots::parse(&list).context("invalid MEAL_TYPES")?,
            None => MealSlots::default(),
        };

        Ok(Self {
            database_url,
            generation,
            meal_slots,
        })
    }
}

fn parse_or<T: FromStr>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    var(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}
