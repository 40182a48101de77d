use nl2sql::generator::PromptTemplate;
use nl2sql::models::{SchemaInfo, TableInfo};
use std::io::Write;

#[test]
fn format_schema_emits_one_line_per_table_and_column() {
    let schema = SchemaInfo::new()
        .with_table(
            TableInfo::new("users", 100)
                .with_column("id", "INTEGER")
                .with_column("name", "TEXT")
                .with_column("age", "INTEGER"),
        )
        .with_table(
            TableInfo::new("products", 50)
                .with_column("id", "INTEGER")
                .with_column("price", "REAL"),
        );

    let rendered = PromptTemplate::format_schema_for_prompt(&schema);

    assert_eq!(rendered.lines().filter(|l| l.starts_with("Table: ")).count(), 2);
    assert_eq!(rendered.lines().filter(|l| l.starts_with("  - ")).count(), 5);
    assert_eq!(rendered.lines().filter(|l| l.starts_with("Row count: ")).count(), 2);
    assert!(rendered.contains("Table: users\nColumns:\n  - id (INTEGER)\n  - name (TEXT)\n  - age (INTEGER)\nRow count: 100\n"));
    assert!(rendered.contains("  - price (REAL)"));
    assert!(rendered.contains("Row count: 50"));

    let users_at = rendered.find("Table: users").unwrap();
    let products_at = rendered.find("Table: products").unwrap();
    assert!(users_at < products_at);
}

#[test]
fn format_schema_empty_is_empty_string() {
    let schema = SchemaInfo::from_json(r#"{"tables": {}}"#).unwrap();
    assert_eq!(PromptTemplate::format_schema_for_prompt(&schema), "");
}

#[test]
fn names_are_inserted_verbatim() {
    let schema = SchemaInfo::new().with_table(TableInfo::new("odd \"name\"", 0).with_column("a b", "TEXT"));
    let rendered = PromptTemplate::format_schema_for_prompt(&schema);
    assert!(rendered.contains("Table: odd \"name\""));
    assert!(rendered.contains("  - a b (TEXT)"));
}

#[test]
fn schema_file_round_trips_into_prompt() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"tables": {{"events": {{"columns": {{"ts": "TEXT", "kind": "TEXT"}}, "row_count": 12}}}}}}"#
    )
    .unwrap();

    let schema = SchemaInfo::from_file(file.path()).unwrap();
    let prompt = PromptTemplate::build_sql_prompt(&schema, "events from last week");

    assert!(prompt.contains("Table: events"));
    assert!(prompt.contains("  - ts (TEXT)\n  - kind (TEXT)"));
    assert!(prompt.contains("Row count: 12"));
    assert!(prompt.contains("date('now', '-7 days')"));
}
