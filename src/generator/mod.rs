// Generator module - prompt construction, provider routing and completion calls

pub mod config;
pub mod llm_client;
pub mod prompts;
pub mod router;

pub use config::{Credentials, DecodingParams, GeneratorConfig};
pub use llm_client::{
    normalize_completion, BoxError, ClientFactory, CompletionBackend, CompletionRequest,
    ProviderAdapter, ProviderSpec, RigClientFactory,
};
pub use prompts::PromptTemplate;
pub use router::{select_question_provider, select_sql_provider, ProviderRouter, EMPTY_SCHEMA_QUESTION};

use crate::error::Nl2SqlError;
use crate::models::{QueryRequest, SchemaInfo};

/// Generate SQL using credentials and model overrides from the process environment.
pub async fn generate_sql(request: &QueryRequest, schema: &SchemaInfo) -> Result<String, Nl2SqlError> {
    ProviderRouter::from_env().route_sql(request, schema).await
}

/// Generate a sample question using credentials from the process environment.
pub async fn generate_question(schema: &SchemaInfo) -> Result<String, Nl2SqlError> {
    ProviderRouter::from_env().route_question(schema).await
}
