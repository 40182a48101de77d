use crate::error::Nl2SqlError;
use crate::generator::config::{Credentials, DecodingParams, GeneratorConfig};
use crate::generator::prompts::PromptTemplate;
use crate::models::{GenerationTask, Provider, SchemaInfo};
use futures::future::BoxFuture;
use rig::client::CompletionClient;
use rig::completion::{AssistantContent, CompletionModel};
use rig::providers::{anthropic, openai};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Everything a provider needs for one completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: Option<String>,
    pub prompt: String,
    pub temperature: f64,
    pub max_tokens: u64,
}

/// A connected provider client able to answer a single completion request.
pub trait CompletionBackend: Send + Sync {
    fn complete<'a>(&'a self, request: &'a CompletionRequest) -> BoxFuture<'a, Result<String, BoxError>>;
}

/// Builds a fresh provider client for each call.
pub trait ClientFactory: Send + Sync {
    fn create(&self, provider: Provider, api_key: &str) -> Result<Box<dyn CompletionBackend>, BoxError>;
}

/// Static description of how one provider is called.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSpec {
    pub provider: Provider,
    pub model: String,
    /// Whether the task's system preamble is sent alongside the prompt.
    pub use_system_prompt: bool,
}

impl ProviderSpec {
    pub fn openai(model: impl Into<String>) -> Self {
        Self {
            provider: Provider::OpenAI,
            model: model.into(),
            use_system_prompt: true,
        }
    }

    pub fn anthropic(model: impl Into<String>) -> Self {
        Self {
            provider: Provider::Anthropic,
            model: model.into(),
            use_system_prompt: false,
        }
    }

    pub fn from_config(provider: Provider, config: &GeneratorConfig) -> Self {
        match provider {
            Provider::OpenAI => Self::openai(config.model_for(provider)),
            Provider::Anthropic => Self::anthropic(config.model_for(provider)),
        }
    }
}

/// One provider adapter: credential check, prompt, single completion, normalization.
#[derive(Clone)]
pub struct ProviderAdapter {
    spec: ProviderSpec,
    credentials: Credentials,
    factory: Arc<dyn ClientFactory>,
}

impl ProviderAdapter {
    pub fn new(spec: ProviderSpec, credentials: Credentials, factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            spec,
            credentials,
            factory,
        }
    }

    pub fn build_request(
        &self,
        task: GenerationTask,
        schema: &SchemaInfo,
        query: Option<&str>,
    ) -> CompletionRequest {
        let params = DecodingParams::for_task(task);

        CompletionRequest {
            model: self.spec.model.clone(),
            system_prompt: self
                .spec
                .use_system_prompt
                .then(|| PromptTemplate::build_system_prompt(task)),
            prompt: PromptTemplate::build_prompt(task, schema, query),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        }
    }

    pub async fn generate_sql(&self, query: &str, schema: &SchemaInfo) -> Result<String, Nl2SqlError> {
        self.generate(GenerationTask::Sql, schema, Some(query)).await
    }

    pub async fn generate_question(&self, schema: &SchemaInfo) -> Result<String, Nl2SqlError> {
        self.generate(GenerationTask::Question, schema, None).await
    }

    async fn generate(
        &self,
        task: GenerationTask,
        schema: &SchemaInfo,
        query: Option<&str>,
    ) -> Result<String, Nl2SqlError> {
        let provider = self.spec.provider;
        let api_key = self.credentials.require(provider)?;
        let request = self.build_request(task, schema, query);

        debug!(
            provider = provider.as_str(),
            model = %request.model,
            temperature = request.temperature,
            max_tokens = request.max_tokens,
            prompt_chars = request.prompt.len(),
            "sending {} completion request",
            task
        );

        let start_time = Instant::now();
        let raw = self.complete(api_key, &request).await.map_err(|e| {
            warn!(provider = provider.as_str(), error = %e, "completion request failed");
            Nl2SqlError::ProviderCall {
                provider,
                task,
                message: e.to_string(),
            }
        })?;

        debug!(
            provider = provider.as_str(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            "completion received"
        );

        Ok(normalize_completion(task, &raw))
    }

    async fn complete(&self, api_key: &str, request: &CompletionRequest) -> Result<String, BoxError> {
        let backend = self.factory.create(self.spec.provider, api_key)?;
        backend.complete(request).await
    }
}

/// Production factory backed by rig's provider clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct RigClientFactory;

impl ClientFactory for RigClientFactory {
    fn create(&self, provider: Provider, api_key: &str) -> Result<Box<dyn CompletionBackend>, BoxError> {
        let backend = match provider {
            Provider::OpenAI => RigBackend::OpenAI(openai::Client::new(api_key)),
            Provider::Anthropic => RigBackend::Anthropic(anthropic::Client::new(api_key)),
        };
        Ok(Box::new(backend))
    }
}

enum RigBackend {
    OpenAI(openai::Client),
    Anthropic(anthropic::Client),
}

impl CompletionBackend for RigBackend {
    fn complete<'a>(&'a self, request: &'a CompletionRequest) -> BoxFuture<'a, Result<String, BoxError>> {
        Box::pin(async move {
            match self {
                RigBackend::OpenAI(client) => {
                    let model = client.completion_model(&request.model);
                    send_completion_request(model, request).await
                }
                RigBackend::Anthropic(client) => {
                    let model = client.completion_model(&request.model);
                    send_completion_request(model, request).await
                }
            }
        })
    }
}

async fn send_completion_request<M: CompletionModel>(
    model: M,
    request: &CompletionRequest,
) -> Result<String, BoxError> {
    let mut builder = model
        .completion_request(request.prompt.as_str())
        .temperature(request.temperature)
        .max_tokens(request.max_tokens);

    if let Some(system_prompt) = &request.system_prompt {
        builder = builder.preamble(system_prompt.clone());
    }

    let response = builder.send().await?;

    extract_text(response.choice.iter())
        .ok_or_else(|| BoxError::from("response contained no text content"))
}

/// Concatenate the text parts of an assistant reply, ignoring tool calls.
fn extract_text<'a>(contents: impl IntoIterator<Item = &'a AssistantContent>) -> Option<String> {
    let mut extracted_text = String::new();
    let mut found = false;

    for content in contents {
        if let AssistantContent::Text(text_content) = content {
            extracted_text.push_str(&text_content.text);
            found = true;
        }
    }

    found.then_some(extracted_text)
}

/// Strip surrounding whitespace and one layer of markdown code fence.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```sql")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);

    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Remove a single matching pair of straight double or single quotes.
pub fn strip_wrapping_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

pub fn normalize_completion(task: GenerationTask, raw: &str) -> String {
    let text = strip_code_fence(raw);
    match task {
        GenerationTask::Sql => text.to_string(),
        GenerationTask::Question => strip_wrapping_quotes(text).to_string(),
    }
}
