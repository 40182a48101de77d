pub mod schema;
pub mod request;

pub use schema::{SchemaInfo, TableInfo, ColumnInfo};
pub use request::{QueryRequest, Provider, GenerationTask, OPENAI_API_KEY_VAR, ANTHROPIC_API_KEY_VAR};
