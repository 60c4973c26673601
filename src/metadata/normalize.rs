//! Folding raw catalog rows into a [`SchemaMetadata`].
//!
//! The normalizer is a pure transform: it never touches a connection and
//! returns a freshly owned structure. Foreign-key rows that point at a table
//! with no column rows are dropped and reported as [`Diagnostic`]s instead of
//! failing the extraction.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, warn};

use super::domain::classify;
use super::error::MetadataResult;
use super::rows::{ColumnRow, FkRow};
use super::types::{ColumnMeta, FkMeta, SchemaMetadata, TableMeta, DEFAULT_REFERENTIAL_ACTION};

/// A non-fatal notice raised during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A foreign-key row referenced a table that had no column rows.
    UnknownFkTable {
        /// Position of the row in the raw FK sequence
        index: usize,
        table: String,
        column: String,
        constraint: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownFkTable {
                index,
                table,
                column,
                constraint,
            } => write!(
                f,
                "fk row #{} ({}) refers to unknown table '{}' (column '{}'), skipped",
                index, constraint, table, column
            ),
        }
    }
}

/// Result of a successful normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub metadata: SchemaMetadata,
    pub diagnostics: Vec<Diagnostic>,
}

impl Normalized {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Normalize raw rows, stamping the result with the current UTC time.
pub fn normalize(
    schema_name: &str,
    raw_columns: &[ColumnRow],
    raw_fks: &[FkRow],
) -> MetadataResult<Normalized> {
    normalize_at(schema_name, raw_columns, raw_fks, Utc::now())
}

/// Normalize raw rows with an explicit extraction timestamp.
///
/// Every row is validated before anything is built, so the call either returns
/// a complete snapshot or the first malformed row.
pub fn normalize_at(
    schema_name: &str,
    raw_columns: &[ColumnRow],
    raw_fks: &[FkRow],
    extracted_at: DateTime<Utc>,
) -> MetadataResult<Normalized> {
    for (index, row) in raw_columns.iter().enumerate() {
        row.validate(index)?;
    }
    for (index, row) in raw_fks.iter().enumerate() {
        row.validate(index)?;
    }

    // Keyed by exact table name; iteration order is the final sort order.
    let mut tables: BTreeMap<String, TableMeta> = BTreeMap::new();

    for row in raw_columns {
        let table = tables.entry(row.table_name.clone()).or_insert_with(|| {
            TableMeta::new(
                row.table_name.clone(),
                row.table_comment.clone().unwrap_or_default(),
                classify(&row.table_name),
            )
        });

        let column = column_from_row(row);
        if column.is_pk {
            table.pk_columns.push(column.name.clone());
        }
        table.columns.push(column);
    }

    let mut diagnostics = Vec::new();

    for (index, row) in raw_fks.iter().enumerate() {
        let Some(table) = tables.get_mut(&row.table_name) else {
            warn!(
                table = %row.table_name,
                column = %row.column_name,
                constraint = %row.constraint_name,
                "fk refers to unknown table"
            );
            diagnostics.push(Diagnostic::UnknownFkTable {
                index,
                table: row.table_name.clone(),
                column: row.column_name.clone(),
                constraint: row.constraint_name.clone(),
            });
            continue;
        };

        table.fk_refs.push(fk_from_row(row));
    }

    let tables: Vec<TableMeta> = tables.into_values().collect();
    let column_count = tables.iter().map(|t| t.columns.len()).sum();

    let metadata = SchemaMetadata {
        schema_name: schema_name.to_string(),
        table_count: tables.len(),
        column_count,
        fk_count: raw_fks.len(),
        tables,
        extracted_at: extracted_at.to_rfc3339_opts(SecondsFormat::Micros, false),
    };

    debug!(
        schema = %metadata.schema_name,
        tables = metadata.table_count,
        columns = metadata.column_count,
        fks = metadata.fk_count,
        skipped = diagnostics.len(),
        "normalized schema metadata"
    );

    Ok(Normalized {
        metadata,
        diagnostics,
    })
}

fn column_from_row(row: &ColumnRow) -> ColumnMeta {
    ColumnMeta {
        col_no: row.col_no,
        name: row.column_name.clone(),
        data_type: row.data_type.clone(),
        nullable: row.is_nullable(),
        key_type: row.key_type.clone().unwrap_or_default(),
        is_pk: row.is_pk(),
        default_value: row.default_value.clone(),
        extra: row.extra_info.clone().unwrap_or_default(),
        comment: row.column_comment.clone().unwrap_or_default(),
    }
}

fn fk_from_row(row: &FkRow) -> FkMeta {
    FkMeta {
        column_name: row.column_name.clone(),
        constraint_name: row.constraint_name.clone(),
        ref_table: row.referenced_table_name.clone(),
        ref_column: row.referenced_column_name.clone(),
        update_rule: referential_action(row.update_rule.as_deref()),
        delete_rule: referential_action(row.delete_rule.as_deref()),
    }
}

fn referential_action(rule: Option<&str>) -> String {
    match rule {
        Some(r) if !r.is_empty() => r.to_string(),
        _ => DEFAULT_REFERENTIAL_ACTION.to_string(),
    }
}
