use serde::{Deserialize, Serialize};
use std::fmt;
use crate::error::Nl2SqlError;

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const ANTHROPIC_API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAI,
    #[default]
    Anthropic,
}

impl Provider {
    pub fn from_str(s: &str) -> Result<Self, Nl2SqlError> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAI),
            "anthropic" => Ok(Provider::Anthropic),
            other => Err(Nl2SqlError::InvalidArguments(format!(
                "Unsupported LLM provider '{}'. Use 'openai' or 'anthropic'",
                other
            ))),
        }
    }

    pub fn from_credential_var(var: &str) -> Option<Self> {
        match var {
            OPENAI_API_KEY_VAR => Some(Provider::OpenAI),
            ANTHROPIC_API_KEY_VAR => Some(Provider::Anthropic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OpenAI",
            Provider::Anthropic => "Anthropic",
        }
    }

    pub fn credential_var(&self) -> &'static str {
        match self {
            Provider::OpenAI => OPENAI_API_KEY_VAR,
            Provider::Anthropic => ANTHROPIC_API_KEY_VAR,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// What a completion is being asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationTask {
    Sql,
    Question,
}

impl GenerationTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationTask::Sql => "SQL",
            GenerationTask::Question => "random query",
        }
    }
}

impl fmt::Display for GenerationTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub llm_provider: Provider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            llm_provider: Provider::default(),
            table_name: None,
        }
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.llm_provider = provider;
        self
    }

    pub fn with_table(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }
}
