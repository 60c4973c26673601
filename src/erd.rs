//! ERD graph assembly.
//!
//! Combines a schema snapshot with a relation list into the flat structure
//! consumed by diagram front-ends. Columns are flagged as foreign keys when a
//! declared constraint originates from them; inferred relations do not set
//! the flag.

use serde::{Deserialize, Serialize};

use crate::inference::InferredRelation;
use crate::metadata::{SchemaMetadata, TableMeta};

/// A column as shown in a diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErdColumn {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
    pub is_pk: bool,
    pub is_fk: bool,
    #[serde(default)]
    pub comment: String,
}

/// A table node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErdTable {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub domain: String,
    pub columns: Vec<ErdColumn>,
}

/// Tables plus relationship edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErdGraph {
    pub tables: Vec<ErdTable>,
    pub relations: Vec<InferredRelation>,
    pub extracted_at: String,
}

impl ErdGraph {
    /// Find a table node by exact name.
    pub fn table(&self, name: &str) -> Option<&ErdTable> {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// Build the diagram graph. Relations are passed through unchanged.
pub fn build_erd(metadata: &SchemaMetadata, relations: Vec<InferredRelation>) -> ErdGraph {
    ErdGraph {
        tables: metadata.tables.iter().map(erd_table).collect(),
        relations,
        extracted_at: metadata.extracted_at.clone(),
    }
}

fn erd_table(table: &TableMeta) -> ErdTable {
    let columns = table
        .columns
        .iter()
        .map(|col| ErdColumn {
            name: col.name.clone(),
            data_type: col.data_type.clone(),
            nullable: col.nullable,
            is_pk: col.is_pk,
            is_fk: table.is_fk_column(&col.name),
            comment: col.comment.clone(),
        })
        .collect();

    ErdTable {
        name: table.name.clone(),
        comment: table.comment.clone(),
        domain: table.domain.clone(),
        columns,
    }
}
