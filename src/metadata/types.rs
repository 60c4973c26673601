//! Canonical schema model produced by the normalizer.

use serde::{Deserialize, Serialize};

/// Update/delete rule used when the catalog does not report one.
pub const DEFAULT_REFERENTIAL_ACTION: &str = "NO ACTION";

/// One column of one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeta {
    /// Ordinal position within the table
    pub col_no: i64,
    pub name: String,
    /// Declared type as rendered by the backend
    pub data_type: String,
    pub nullable: bool,
    /// Backend key tag: `PRI`, `MUL`, `UNI` or empty
    pub key_type: String,
    pub is_pk: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub extra: String,
    #[serde(default)]
    pub comment: String,
}

/// A declared foreign-key reference from one column of the owning table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FkMeta {
    pub column_name: String,
    pub constraint_name: String,
    pub ref_table: String,
    pub ref_column: String,
    #[serde(default = "default_action")]
    pub update_rule: String,
    #[serde(default = "default_action")]
    pub delete_rule: String,
}

fn default_action() -> String {
    DEFAULT_REFERENTIAL_ACTION.to_string()
}

/// One table with its columns, primary key and declared foreign keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMeta {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    /// Grouping label derived from the name prefix
    #[serde(default)]
    pub domain: String,
    /// Columns in ordinal order
    #[serde(default)]
    pub columns: Vec<ColumnMeta>,
    /// Primary key column names in column order
    #[serde(default)]
    pub pk_columns: Vec<String>,
    #[serde(default)]
    pub fk_refs: Vec<FkMeta>,
}

impl TableMeta {
    /// Create an empty table.
    pub fn new(name: impl Into<String>, comment: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: comment.into(),
            domain: domain.into(),
            columns: Vec::new(),
            pk_columns: Vec::new(),
            fk_refs: Vec::new(),
        }
    }

    /// Whether any declared foreign key originates from this column.
    pub fn is_fk_column(&self, name: &str) -> bool {
        self.fk_refs.iter().any(|fk| fk.column_name == name)
    }
}

/// Snapshot of one schema.
///
/// `fk_count` is the number of raw foreign-key rows received, which can be
/// larger than the number attached to tables when rows referenced unknown
/// tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaMetadata {
    pub schema_name: String,
    pub table_count: usize,
    pub column_count: usize,
    pub fk_count: usize,
    /// Tables sorted by name
    pub tables: Vec<TableMeta>,
    /// ISO 8601 UTC timestamp
    pub extracted_at: String,
}

impl SchemaMetadata {
    /// Find a table by name (case-insensitive).
    pub fn table(&self, name: &str) -> Option<&TableMeta> {
        self.tables
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Number of foreign keys actually attached to tables.
    pub fn attached_fk_count(&self) -> usize {
        self.tables.iter().map(|t| t.fk_refs.len()).sum()
    }
}
