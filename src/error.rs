use crate::models::{GenerationTask, Provider};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Nl2SqlError {
    #[error("{var} environment variable not set")]
    MissingCredential { var: &'static str },

    #[error("Error generating {task} with {provider}: {message}")]
    ProviderCall {
        provider: Provider,
        task: GenerationTask,
        message: String,
    },

    #[error("No LLM API keys available. Please set OPENAI_API_KEY or ANTHROPIC_API_KEY.")]
    NoCredentials,

    #[error("Invalid schema: {0}")]
    SchemaError(String),

    #[error("Invalid command line arguments: {0}")]
    InvalidArguments(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Nl2SqlError {
    /// True when the failure comes from missing credentials rather than the provider.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Nl2SqlError::MissingCredential { .. } | Nl2SqlError::NoCredentials
        )
    }

    /// Process exit status the binary reports for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Nl2SqlError::InvalidArguments(_) => 2,
            Nl2SqlError::MissingCredential { .. } | Nl2SqlError::NoCredentials => 3,
            Nl2SqlError::SchemaError(_) => 4,
            Nl2SqlError::ProviderCall { .. } => 5,
            Nl2SqlError::IoError(_) | Nl2SqlError::SerializationError(_) => 1,
        }
    }

    pub fn provider(&self) -> Option<Provider> {
        match self {
            Nl2SqlError::ProviderCall { provider, .. } => Some(*provider),
            Nl2SqlError::MissingCredential { var } => Provider::from_credential_var(var),
            _ => None,
        }
    }
}
