use crate::models::{GenerationTask, SchemaInfo};

pub struct PromptTemplate;

impl PromptTemplate {
    /// Render the schema as the plain-text block embedded in every prompt.
    ///
    /// Names are inserted verbatim; callers are expected to pass identifiers
    /// that came from the database itself.
    pub fn format_schema_for_prompt(schema: &SchemaInfo) -> String {
        let mut lines = Vec::new();

        for table in &schema.tables {
            lines.push(format!("Table: {}", table.name));
            lines.push("Columns:".to_string());

            for column in &table.columns {
                lines.push(format!("  - {} ({})", column.name, column.data_type));
            }

            lines.push(format!("Row count: {}", table.row_count));
            lines.push(String::new());
        }

        lines.join("\n")
    }

    pub fn build_sql_prompt(schema: &SchemaInfo, query: &str) -> String {
        format!(
            r#"Given the following database schema:

{}

Convert this natural language query to SQL: "{}"

Rules:
- Return ONLY the SQL query, no explanations
- Use proper SQLite syntax
- Handle date/time queries appropriately (e.g., "last week" = date('now', '-7 days'))
- Be careful with column names and table names
- If the query is ambiguous, make reasonable assumptions
- For multi-table queries, use proper JOIN conditions to avoid Cartesian products
- Limit results to reasonable amounts (e.g., add LIMIT 100 for large result sets)
- When joining tables, use meaningful relationships between tables

SQL Query:"#,
            Self::format_schema_for_prompt(schema),
            query
        )
    }

    pub fn build_question_prompt(schema: &SchemaInfo) -> String {
        format!(
            r#"Given the following database schema:

{}

Generate an interesting natural language query that a user might ask about this data.

Rules:
- Return ONLY the natural language query text, no explanations or metadata
- Limit the query to TWO sentences maximum
- Make the query contextually relevant to the available tables and columns
- Focus on demonstrating useful query capabilities like filtering, aggregation, sorting, or multi-table analysis
- Make the query interesting and varied - avoid simple "show all" queries
- If multiple tables exist, occasionally create queries that would involve relationships between tables
- The query should be executable and return meaningful results

Natural Language Query:"#,
            Self::format_schema_for_prompt(schema)
        )
    }

    pub fn build_prompt(task: GenerationTask, schema: &SchemaInfo, query: Option<&str>) -> String {
        match task {
            GenerationTask::Sql => Self::build_sql_prompt(schema, query.unwrap_or_default()),
            GenerationTask::Question => Self::build_question_prompt(schema),
        }
    }

    pub fn build_system_prompt(task: GenerationTask) -> String {
        match task {
            GenerationTask::Sql => {
                "You are a SQL expert. Convert natural language to SQL queries.".to_string()
            }
            GenerationTask::Question => {
                "You are a helpful assistant that generates interesting natural language database queries."
                    .to_string()
            }
        }
    }
}
