use clap::{Parser, Subcommand};
use std::path::PathBuf;
use crate::error::Nl2SqlError;
use crate::generator::config::{DEFAULT_ANTHROPIC_MODEL, DEFAULT_OPENAI_MODEL};
use crate::generator::GeneratorConfig;
use crate::models::{Provider, QueryRequest};

#[derive(Parser, Debug)]
#[command(name = "nl2sql")]
#[command(about = "Translate natural language into SQL using OpenAI or Anthropic models")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Schema description as JSON ({"tables": {...}}); use '-' to read stdin
    #[arg(short = 's', long, env = "NL2SQL_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Model used when OpenAI is selected
    #[arg(long, env = "NL2SQL_OPENAI_MODEL", default_value = DEFAULT_OPENAI_MODEL)]
    pub openai_model: String,

    /// Model used when Anthropic is selected
    #[arg(long, env = "NL2SQL_ANTHROPIC_MODEL", default_value = DEFAULT_ANTHROPIC_MODEL)]
    pub anthropic_model: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Enable debug output including request parameters
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Convert a natural language request into a SQL statement
    Sql {
        /// Preferred provider when no API key decides (openai, anthropic)
        #[arg(short = 'p', long, default_value = "anthropic", value_parser = parse_provider)]
        provider: Provider,

        /// Only consider this table (informational)
        #[arg(long)]
        table: Option<String>,

        /// The natural language request
        #[arg(trailing_var_arg = true, required = true)]
        query: Vec<String>,
    },

    /// Suggest an interesting question to ask about the schema
    Question,
}

impl Cli {
    pub fn parse_args() -> Result<Self, Nl2SqlError> {
        let cli = match Self::try_parse() {
            Ok(cli) => cli,
            // --help and --version are not failures
            Err(e) if !e.use_stderr() => e.exit(),
            Err(e) => return Err(Nl2SqlError::InvalidArguments(e.to_string())),
        };

        cli.validate()?;

        Ok(cli)
    }

    pub fn validate(&self) -> Result<(), Nl2SqlError> {
        if self.openai_model.trim().is_empty() || self.anthropic_model.trim().is_empty() {
            return Err(Nl2SqlError::InvalidArguments(
                "Model names cannot be empty".to_string(),
            ));
        }

        if let Command::Sql { query, .. } = &self.command {
            if query.iter().all(|part| part.trim().is_empty()) {
                return Err(Nl2SqlError::InvalidArguments(
                    "Query text is required".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::default()
            .with_openai_model(self.openai_model.trim())
            .with_anthropic_model(self.anthropic_model.trim())
    }

    /// The request for the `sql` subcommand, if that is what was invoked.
    pub fn query_request(&self) -> Option<QueryRequest> {
        match &self.command {
            Command::Sql { provider, table, query } => {
                let mut request = QueryRequest::new(query.join(" ")).with_provider(*provider);
                if let Some(table) = table {
                    request = request.with_table(table.clone());
                }
                Some(request)
            }
            Command::Question => None,
        }
    }

    pub fn reads_schema_from_stdin(&self) -> bool {
        self.schema.as_deref().map(|p| p.as_os_str() == "-").unwrap_or(false)
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose || self.debug
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "nl2sql=debug,warn"
        } else if self.verbose {
            "nl2sql=info,warn"
        } else {
            "warn"
        }
    }
}

fn parse_provider(s: &str) -> Result<Provider, String> {
    Provider::from_str(s).map_err(|e| e.to_string())
}
