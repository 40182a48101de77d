use serde::{Deserialize, Serialize};
use crate::error::Nl2SqlError;
use crate::models::{GenerationTask, Provider, ANTHROPIC_API_KEY_VAR, OPENAI_API_KEY_VAR};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-haiku-20240307";

pub const OPENAI_MODEL_VAR: &str = "NL2SQL_OPENAI_MODEL";
pub const ANTHROPIC_MODEL_VAR: &str = "NL2SQL_ANTHROPIC_MODEL";

/// Snapshot of which provider credentials are configured.
///
/// Routing only looks at presence; the key values are handed to the client
/// factory and never logged.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    openai_api_key: Option<String>,
    anthropic_api_key: Option<String>,
}

impl Credentials {
    pub fn new(openai_api_key: Option<String>, anthropic_api_key: Option<String>) -> Self {
        Self {
            openai_api_key: non_empty(openai_api_key),
            anthropic_api_key: non_empty(anthropic_api_key),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::new(
            std::env::var(OPENAI_API_KEY_VAR).ok(),
            std::env::var(ANTHROPIC_API_KEY_VAR).ok(),
        )
    }

    pub fn with_openai(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = non_empty(Some(key.into()));
        self
    }

    pub fn with_anthropic(mut self, key: impl Into<String>) -> Self {
        self.anthropic_api_key = non_empty(Some(key.into()));
        self
    }

    pub fn has(&self, provider: Provider) -> bool {
        self.key_for(provider).is_some()
    }

    pub fn key_for(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::OpenAI => self.openai_api_key.as_deref(),
            Provider::Anthropic => self.anthropic_api_key.as_deref(),
        }
    }

    pub fn require(&self, provider: Provider) -> Result<&str, Nl2SqlError> {
        self.key_for(provider).ok_or(Nl2SqlError::MissingCredential {
            var: provider.credential_var(),
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openai", &self.has(Provider::OpenAI))
            .field("anthropic", &self.has(Provider::Anthropic))
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Fixed decoding parameters for one kind of completion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecodingParams {
    pub temperature: f64,
    pub max_tokens: u64,
}

impl DecodingParams {
    pub fn for_task(task: GenerationTask) -> Self {
        match task {
            GenerationTask::Sql => Self {
                temperature: 0.1,
                max_tokens: 500,
            },
            GenerationTask::Question => Self {
                temperature: 0.7,
                max_tokens: 100,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub openai_model: String,
    pub anthropic_model: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            anthropic_model: DEFAULT_ANTHROPIC_MODEL.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            openai_model: std::env::var(OPENAI_MODEL_VAR)
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.openai_model),
            anthropic_model: std::env::var(ANTHROPIC_MODEL_VAR)
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.anthropic_model),
        }
    }

    pub fn with_openai_model(mut self, model: impl Into<String>) -> Self {
        self.openai_model = model.into();
        self
    }

    pub fn with_anthropic_model(mut self, model: impl Into<String>) -> Self {
        self.anthropic_model = model.into();
        self
    }

    pub fn model_for(&self, provider: Provider) -> &str {
        match provider {
            Provider::OpenAI => &self.openai_model,
            Provider::Anthropic => &self.anthropic_model,
        }
    }
}
