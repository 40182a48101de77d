use serde::Serialize;
use crate::cli::args::Cli;
use crate::error::Nl2SqlError;
use crate::models::QueryRequest;

#[derive(Debug, Serialize)]
struct SqlOutput<'a> {
    query: &'a str,
    llm_provider: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    table_name: Option<&'a str>,
    sql: &'a str,
}

#[derive(Debug, Serialize)]
struct QuestionOutput<'a> {
    query: &'a str,
}

#[derive(Debug, Serialize)]
struct ErrorOutput {
    error: String,
    kind: &'static str,
}

pub struct ResultFormatter {
    json: bool,
    verbose: bool,
}

impl ResultFormatter {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.json,
            verbose: cli.is_verbose(),
        }
    }

    pub fn plain() -> Self {
        Self {
            json: false,
            verbose: false,
        }
    }

    pub fn json() -> Self {
        Self {
            json: true,
            verbose: false,
        }
    }

    pub fn format_sql(&self, request: &QueryRequest, sql: &str) -> Result<String, Nl2SqlError> {
        if self.json {
            let output = SqlOutput {
                query: &request.query,
                llm_provider: request.llm_provider.as_str(),
                table_name: request.table_name.as_deref(),
                sql,
            };
            return Ok(serde_json::to_string_pretty(&output)?);
        }

        if self.verbose {
            Ok(format!("-- {}\n{}", request.query, sql))
        } else {
            Ok(sql.to_string())
        }
    }

    pub fn format_question(&self, question: &str) -> Result<String, Nl2SqlError> {
        if self.json {
            return Ok(serde_json::to_string_pretty(&QuestionOutput { query: question })?);
        }

        Ok(question.to_string())
    }

    pub fn format_error(&self, error: &Nl2SqlError) -> String {
        if self.json {
            let output = ErrorOutput {
                error: error.to_string(),
                kind: error_kind(error),
            };
            if let Ok(rendered) = serde_json::to_string_pretty(&output) {
                return rendered;
            }
        }

        format!("Error: {}", error)
    }
}

fn error_kind(error: &Nl2SqlError) -> &'static str {
    match error {
        Nl2SqlError::MissingCredential { .. } | Nl2SqlError::NoCredentials => "configuration",
        Nl2SqlError::ProviderCall { .. } => "provider",
        Nl2SqlError::SchemaError(_) => "schema",
        Nl2SqlError::InvalidArguments(_) => "arguments",
        Nl2SqlError::IoError(_) | Nl2SqlError::SerializationError(_) => "io",
    }
}
