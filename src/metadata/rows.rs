//! Raw catalog row contract.
//!
//! Each backend collaborator projects its catalog query results into these two
//! shapes before handing them to the normalizer. Field names match the JSON
//! the collaborators emit, so rows deserialize directly with `serde_json`.

use serde::{Deserialize, Serialize};

use super::error::{MetadataError, MetadataResult, RowKind};

/// Flag value meaning "yes" in `nullable_yn` / `pk_yn`.
pub const YES: &str = "Y";

/// One column of one table, as returned by a catalog query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRow {
    pub table_name: String,
    #[serde(default)]
    pub table_comment: Option<String>,
    pub col_no: i64,
    pub column_name: String,
    /// Backend-rendered type including length/precision (e.g. `varchar(20)`).
    pub data_type: String,
    pub nullable_yn: String,
    #[serde(default)]
    pub key_type: Option<String>,
    pub pk_yn: String,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub extra_info: Option<String>,
    #[serde(default)]
    pub column_comment: Option<String>,
}

impl ColumnRow {
    /// Create a row with the identifying fields set and everything else empty.
    pub fn new(table_name: impl Into<String>, col_no: i64, column_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            table_comment: None,
            col_no,
            column_name: column_name.into(),
            data_type: String::new(),
            nullable_yn: YES.to_string(),
            key_type: None,
            pk_yn: "N".to_string(),
            default_value: None,
            extra_info: None,
            column_comment: None,
        }
    }

    /// Builder: set the data type.
    pub fn with_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }

    /// Builder: mark as primary key (implies NOT NULL and `PRI` key type).
    pub fn primary_key(mut self) -> Self {
        self.pk_yn = YES.to_string();
        self.nullable_yn = "N".to_string();
        self.key_type = Some("PRI".to_string());
        self
    }

    /// Builder: set the column comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.column_comment = Some(comment.into());
        self
    }

    /// Builder: set the owning table's comment.
    pub fn with_table_comment(mut self, comment: impl Into<String>) -> Self {
        self.table_comment = Some(comment.into());
        self
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable_yn == YES
    }

    pub fn is_pk(&self) -> bool {
        self.pk_yn == YES
    }

    /// Check that the identifying fields are present.
    ///
    /// `index` is the row's position in its input sequence, used in the error.
    pub fn validate(&self, index: usize) -> MetadataResult<()> {
        require(RowKind::Column, index, "table_name", &self.table_name)?;
        require(RowKind::Column, index, "column_name", &self.column_name)
    }
}

/// One declared foreign-key reference, as returned by a catalog query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FkRow {
    pub table_name: String,
    pub column_name: String,
    pub constraint_name: String,
    pub referenced_table_name: String,
    pub referenced_column_name: String,
    #[serde(default)]
    pub update_rule: Option<String>,
    #[serde(default)]
    pub delete_rule: Option<String>,
}

impl FkRow {
    pub fn new(
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        referenced_table_name: impl Into<String>,
        referenced_column_name: impl Into<String>,
    ) -> Self {
        let table_name = table_name.into();
        let column_name = column_name.into();
        Self {
            constraint_name: format!("fk_{}_{}", table_name, column_name),
            table_name,
            column_name,
            referenced_table_name: referenced_table_name.into(),
            referenced_column_name: referenced_column_name.into(),
            update_rule: None,
            delete_rule: None,
        }
    }

    /// Check that the identifying fields are present.
    pub fn validate(&self, index: usize) -> MetadataResult<()> {
        require(RowKind::ForeignKey, index, "table_name", &self.table_name)?;
        require(RowKind::ForeignKey, index, "column_name", &self.column_name)?;
        require(
            RowKind::ForeignKey,
            index,
            "referenced_table_name",
            &self.referenced_table_name,
        )?;
        require(
            RowKind::ForeignKey,
            index,
            "referenced_column_name",
            &self.referenced_column_name,
        )
    }
}

fn require(kind: RowKind, index: usize, field: &'static str, value: &str) -> MetadataResult<()> {
    if value.is_empty() {
        return Err(MetadataError::MalformedRow { kind, index, field });
    }
    Ok(())
}
