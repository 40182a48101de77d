#[path = "../common/mod.rs"]
mod common;

use common::{shop_schema, users_schema, RecordingFactory};
use nl2sql::error::Nl2SqlError;
use nl2sql::generator::{Credentials, GeneratorConfig, ProviderRouter};
use nl2sql::models::{Provider, QueryRequest};
use std::sync::Arc;

fn router(credentials: Credentials, factory: &RecordingFactory) -> ProviderRouter {
    ProviderRouter::with_factory(credentials, &GeneratorConfig::default(), Arc::new(factory.clone()))
}

#[tokio::test]
async fn openai_key_wins_over_anthropic_preference() {
    let factory = RecordingFactory::replying("```sql\nSELECT * FROM users WHERE age > 30\n```");
    let router = router(Credentials::none().with_openai("sk-openai"), &factory);
    let request = QueryRequest::new("users over 30").with_provider(Provider::Anthropic);

    let sql = router.route_sql(&request, &users_schema()).await.unwrap();
    assert_eq!(sql, "SELECT * FROM users WHERE age > 30");

    let call = factory.single_call();
    assert_eq!(call.provider, Provider::OpenAI);
    assert_eq!(call.api_key, "sk-openai");

    let prompt = &call.request.prompt;
    assert!(prompt.contains("Table: users"));
    assert!(prompt.contains("- id (INTEGER)"));
    assert!(prompt.contains("- age (INTEGER)"));
    assert!(prompt.contains("Row count: 3"));
    assert!(prompt.contains("users over 30"));
}

#[tokio::test]
async fn both_keys_prefer_openai() {
    let factory = RecordingFactory::replying("SELECT * FROM inventory");
    let credentials = Credentials::none().with_openai("sk-openai").with_anthropic("sk-ant");
    let router = router(credentials, &factory);

    let request = QueryRequest::new("Show inventory").with_provider(Provider::Anthropic);
    let sql = router.route_sql(&request, &shop_schema()).await.unwrap();

    assert_eq!(sql, "SELECT * FROM inventory");
    assert_eq!(factory.single_call().provider, Provider::OpenAI);
}

#[tokio::test]
async fn anthropic_key_used_when_openai_missing() {
    let factory = RecordingFactory::replying("```\nSELECT * FROM orders\n```");
    let router = router(Credentials::none().with_anthropic("sk-ant"), &factory);

    let request = QueryRequest::new("Show all orders").with_provider(Provider::OpenAI);
    let sql = router.route_sql(&request, &shop_schema()).await.unwrap();

    assert_eq!(sql, "SELECT * FROM orders");
    let call = factory.single_call();
    assert_eq!(call.provider, Provider::Anthropic);
    assert_eq!(call.request.model, "claude-3-haiku-20240307");
}

#[tokio::test]
async fn no_keys_fall_back_to_stated_preference() {
    for preference in [Provider::OpenAI, Provider::Anthropic] {
        let factory = RecordingFactory::replying("SELECT 1");
        let router = router(Credentials::none(), &factory);
        let request = QueryRequest::new("anything").with_provider(preference);

        let err = router.route_sql(&request, &users_schema()).await.unwrap_err();
        match err {
            Nl2SqlError::MissingCredential { var } => assert_eq!(var, preference.credential_var()),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(factory.calls().is_empty());
    }
}

#[tokio::test]
async fn sql_request_uses_deterministic_decoding() {
    let factory = RecordingFactory::replying("SELECT name FROM customers");
    let router = router(Credentials::none().with_openai("sk-openai"), &factory);

    router
        .route_sql(&QueryRequest::new("customer names"), &shop_schema())
        .await
        .unwrap();

    let request = factory.single_call().request;
    assert_eq!(request.model, "gpt-4.1-mini");
    assert_eq!(request.temperature, 0.1);
    assert_eq!(request.max_tokens, 500);
    assert!(request.system_prompt.unwrap().contains("SQL expert"));
    assert!(request.prompt.contains("Table: customers"));
    assert!(request.prompt.contains("Table: orders"));
}

#[tokio::test]
async fn model_overrides_reach_the_client() {
    let factory = RecordingFactory::replying("SELECT 1");
    let config = GeneratorConfig::default().with_anthropic_model("claude-3-5-sonnet-latest");
    let router = ProviderRouter::with_factory(
        Credentials::none().with_anthropic("sk-ant"),
        &config,
        Arc::new(factory.clone()),
    );

    router.route_sql(&QueryRequest::new("one"), &users_schema()).await.unwrap();
    assert_eq!(factory.single_call().request.model, "claude-3-5-sonnet-latest");
}

#[tokio::test]
async fn cli_handler_renders_json_for_schema_file() {
    use clap::Parser;
    use nl2sql::cli::{Cli, CliHandler};
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&users_schema()).unwrap().as_bytes()).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let cli = Cli::try_parse_from(["nl2sql", "--schema", path.as_str(), "--json", "sql", "users", "over", "30"]).unwrap();
    let factory = RecordingFactory::replying("```sql\nSELECT * FROM users WHERE age > 30\n```");
    let router = router(Credentials::none().with_openai("sk-openai"), &factory);

    let output = CliHandler::new(cli).run_with_router(&router).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["sql"], "SELECT * FROM users WHERE age > 30");
    assert_eq!(value["query"], "users over 30");
    assert!(factory.single_call().request.prompt.contains("Row count: 3"));
}
