#[path = "../common/mod.rs"]
mod common;

use common::{users_schema, RecordingFactory};
use nl2sql::generator::{
    ClientFactory, Credentials, GeneratorConfig, ProviderAdapter, ProviderSpec, ProviderRouter,
};
use nl2sql::models::{GenerationTask, Provider, QueryRequest};
use std::sync::Arc;

#[test]
fn provider_specs_use_default_models() {
    let config = GeneratorConfig::default();

    let openai = ProviderSpec::from_config(Provider::OpenAI, &config);
    assert_eq!(openai.model, "gpt-4.1-mini");
    assert!(openai.use_system_prompt);

    let anthropic = ProviderSpec::from_config(Provider::Anthropic, &config);
    assert_eq!(anthropic.model, "claude-3-haiku-20240307");
    assert!(!anthropic.use_system_prompt);
}

#[test]
fn request_shape_per_task() {
    let factory: Arc<dyn ClientFactory> = Arc::new(RecordingFactory::replying(""));
    let adapter = ProviderAdapter::new(ProviderSpec::openai("gpt-4.1-mini"), Credentials::none(), factory);

    let sql = adapter.build_request(GenerationTask::Sql, &users_schema(), Some("users over 30"));
    assert_eq!((sql.temperature, sql.max_tokens), (0.1, 500));
    assert!(sql.prompt.contains("Convert this natural language query to SQL: \"users over 30\""));

    let question = adapter.build_request(GenerationTask::Question, &users_schema(), None);
    assert_eq!((question.temperature, question.max_tokens), (0.7, 100));
    assert!(question.prompt.contains("Generate an interesting natural language query"));
    assert!(question
        .system_prompt
        .unwrap()
        .contains("generates interesting natural language database queries"));
}

#[tokio::test]
async fn each_call_builds_a_fresh_client() {
    let factory = RecordingFactory::replying("SELECT 1");
    let router = ProviderRouter::with_factory(
        Credentials::none().with_anthropic("sk-ant"),
        &GeneratorConfig::default(),
        Arc::new(factory.clone()),
    );

    let request = QueryRequest::new("one");
    router.route_sql(&request, &users_schema()).await.unwrap();
    router.route_sql(&request, &users_schema()).await.unwrap();

    assert_eq!(factory.clients_created(), 2);

    let calls = factory.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c.api_key == "sk-ant"));
    assert_eq!(calls[0].request, calls[1].request);
}
