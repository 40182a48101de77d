use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;
use crate::error::Nl2SqlError;

/// Database schema as reported by the introspection layer.
///
/// Tables and columns keep the order in which they were declared, because the
/// prompt renders them in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaInfo {
    #[serde(
        default,
        serialize_with = "serialize_tables",
        deserialize_with = "deserialize_tables"
    )]
    pub tables: Vec<TableInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    pub row_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
}

impl SchemaInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: TableInfo) -> Self {
        self.tables.push(table);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, Nl2SqlError> {
        serde_json::from_str(json).map_err(|e| Nl2SqlError::SchemaError(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, Nl2SqlError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Nl2SqlError::SchemaError(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

impl TableInfo {
    pub fn new(name: impl Into<String>, row_count: u64) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            row_count,
        }
    }

    pub fn with_column(mut self, name: impl Into<String>, data_type: impl Into<String>) -> Self {
        self.columns.push(ColumnInfo {
            name: name.into(),
            data_type: data_type.into(),
        });
        self
    }
}

// Wire shape of a single table entry; the table name is the enclosing map key.
#[derive(Serialize, Deserialize)]
struct TableBody {
    #[serde(
        default,
        serialize_with = "serialize_columns",
        deserialize_with = "deserialize_columns"
    )]
    columns: Vec<ColumnInfo>,
    #[serde(default)]
    row_count: u64,
}

fn serialize_tables<S: Serializer>(tables: &[TableInfo], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(tables.len()))?;
    for table in tables {
        map.serialize_entry(
            &table.name,
            &TableBody {
                columns: table.columns.clone(),
                row_count: table.row_count,
            },
        )?;
    }
    map.end()
}

fn deserialize_tables<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<TableInfo>, D::Error> {
    struct TablesVisitor;

    impl<'de> Visitor<'de> for TablesVisitor {
        type Value = Vec<TableInfo>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of table name to table descriptor")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut tables: Vec<TableInfo> = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, body)) = access.next_entry::<String, TableBody>()? {
                if tables.iter().any(|t| t.name == name) {
                    return Err(de::Error::custom(format!("duplicate table '{}'", name)));
                }
                tables.push(TableInfo {
                    name,
                    columns: body.columns,
                    row_count: body.row_count,
                });
            }
            Ok(tables)
        }
    }

    deserializer.deserialize_map(TablesVisitor)
}

fn serialize_columns<S: Serializer>(columns: &[ColumnInfo], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(columns.len()))?;
    for column in columns {
        map.serialize_entry(&column.name, &column.data_type)?;
    }
    map.end()
}

fn deserialize_columns<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<ColumnInfo>, D::Error> {
    struct ColumnsVisitor;

    impl<'de> Visitor<'de> for ColumnsVisitor {
        type Value = Vec<ColumnInfo>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of column name to column type")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut columns = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, data_type)) = access.next_entry::<String, String>()? {
                columns.push(ColumnInfo { name, data_type });
            }
            Ok(columns)
        }
    }

    deserializer.deserialize_map(ColumnsVisitor)
}
