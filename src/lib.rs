pub mod cli;
pub mod error;
pub mod generator;
pub mod models;

pub use error::Nl2SqlError;

// Re-export commonly used types
pub use models::{ColumnInfo, GenerationTask, Provider, QueryRequest, SchemaInfo, TableInfo};

pub use generator::{
    generate_question, generate_sql, Credentials, GeneratorConfig, PromptTemplate, ProviderRouter,
};

pub use cli::CliHandler;
