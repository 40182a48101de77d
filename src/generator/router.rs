use crate::error::Nl2SqlError;
use crate::generator::config::{Credentials, GeneratorConfig};
use crate::generator::llm_client::{ClientFactory, ProviderAdapter, ProviderSpec, RigClientFactory};
use crate::models::{Provider, QueryRequest, SchemaInfo};
use std::sync::Arc;
use tracing::{debug, info};

pub const EMPTY_SCHEMA_QUESTION: &str =
    "Upload data to start exploring your database with natural language queries.";

/// Provider to use for SQL generation.
///
/// A configured OpenAI key wins over everything, including the caller's
/// preference. Then a configured Anthropic key. With neither configured the
/// preference decides.
pub fn select_sql_provider(credentials: &Credentials, preference: Provider) -> Provider {
    if credentials.has(Provider::OpenAI) {
        Provider::OpenAI
    } else if credentials.has(Provider::Anthropic) {
        Provider::Anthropic
    } else {
        preference
    }
}

/// Provider to use for question generation. There is no preference fallback.
pub fn select_question_provider(credentials: &Credentials) -> Result<Provider, Nl2SqlError> {
    if credentials.has(Provider::OpenAI) {
        Ok(Provider::OpenAI)
    } else if credentials.has(Provider::Anthropic) {
        Ok(Provider::Anthropic)
    } else {
        Err(Nl2SqlError::NoCredentials)
    }
}

pub struct ProviderRouter {
    credentials: Credentials,
    openai: ProviderAdapter,
    anthropic: ProviderAdapter,
}

impl ProviderRouter {
    pub fn new(credentials: Credentials, config: &GeneratorConfig) -> Self {
        Self::with_factory(credentials, config, Arc::new(RigClientFactory))
    }

    pub fn from_env() -> Self {
        Self::new(Credentials::from_env(), &GeneratorConfig::from_env())
    }

    pub fn with_factory(
        credentials: Credentials,
        config: &GeneratorConfig,
        factory: Arc<dyn ClientFactory>,
    ) -> Self {
        let openai = ProviderAdapter::new(
            ProviderSpec::from_config(Provider::OpenAI, config),
            credentials.clone(),
            factory.clone(),
        );
        let anthropic = ProviderAdapter::new(
            ProviderSpec::from_config(Provider::Anthropic, config),
            credentials.clone(),
            factory,
        );

        Self {
            credentials,
            openai,
            anthropic,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn adapter(&self, provider: Provider) -> &ProviderAdapter {
        match provider {
            Provider::OpenAI => &self.openai,
            Provider::Anthropic => &self.anthropic,
        }
    }

    pub async fn route_sql(&self, request: &QueryRequest, schema: &SchemaInfo) -> Result<String, Nl2SqlError> {
        let provider = select_sql_provider(&self.credentials, request.llm_provider);

        if provider != request.llm_provider {
            debug!(
                requested = request.llm_provider.as_str(),
                selected = provider.as_str(),
                "configured credential overrides provider preference"
            );
        }
        info!(provider = provider.as_str(), tables = schema.table_count(), "generating SQL");

        self.adapter(provider).generate_sql(&request.query, schema).await
    }

    pub async fn route_question(&self, schema: &SchemaInfo) -> Result<String, Nl2SqlError> {
        if schema.is_empty() {
            debug!("schema has no tables; returning upload prompt");
            return Ok(EMPTY_SCHEMA_QUESTION.to_string());
        }

        let provider = select_question_provider(&self.credentials)?;
        info!(provider = provider.as_str(), tables = schema.table_count(), "generating sample question");

        self.adapter(provider).generate_question(schema).await
    }
}
