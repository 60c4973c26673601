//! CatalogProvider trait definition.
//!
//! Backend collaborators (MySQL, MSSQL, Oracle drivers) implement
//! [`CatalogProvider`] and return rows already projected into the canonical
//! [`ColumnRow`] / [`FkRow`] shape. Normalization and inference stay local and
//! never branch on backend identity.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use super::error::MetadataError;
use super::normalize::{normalize, Normalized};
use super::rows::{ColumnRow, FkRow};

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur while extracting a schema.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The backend failed to return rows.
    #[error("failed to fetch {what} for schema '{schema}': {message}")]
    Fetch {
        schema: String,
        what: &'static str,
        message: String,
    },

    /// The schema is not known to this provider.
    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    /// Rows were fetched but could not be normalized.
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

impl ProviderError {
    /// Create a fetch error.
    pub fn fetch(schema: impl Into<String>, what: &'static str, message: impl Into<String>) -> Self {
        Self::Fetch {
            schema: schema.into(),
            what,
            message: message.into(),
        }
    }
}

/// Source of raw catalog rows for a schema.
///
/// # Example
///
/// ```ignore
/// use erdai::metadata::{extract_metadata, StaticCatalog};
///
/// let catalog = StaticCatalog::new().with_schema("shop", columns, fks);
/// let normalized = extract_metadata(&catalog, "shop").await?;
/// ```
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Column rows for every table in the schema, ordered by table then ordinal.
    async fn column_rows(&self, schema: &str) -> ProviderResult<Vec<ColumnRow>>;

    /// Foreign-key rows for every table in the schema.
    async fn fk_rows(&self, schema: &str) -> ProviderResult<Vec<FkRow>>;
}

/// Fetch rows for one schema and normalize them.
pub async fn extract_metadata<P>(provider: &P, schema: &str) -> ProviderResult<Normalized>
where
    P: CatalogProvider + ?Sized,
{
    info!(schema, "extracting metadata");

    let columns = provider.column_rows(schema).await?;
    let fks = provider.fk_rows(schema).await?;

    info!(columns = columns.len(), fks = fks.len(), "fetched raw rows");

    let normalized = normalize(schema, &columns, &fks)?;

    info!(
        tables = normalized.metadata.table_count,
        columns = normalized.metadata.column_count,
        fks = normalized.metadata.fk_count,
        "extract_metadata done"
    );

    Ok(normalized)
}

/// Extract several schemas concurrently.
///
/// Results are returned in the order of `schemas`; each entry succeeds or
/// fails independently.
pub async fn extract_schemas<P>(provider: &P, schemas: &[String]) -> Vec<ProviderResult<Normalized>>
where
    P: CatalogProvider + ?Sized,
{
    let futures: Vec<_> = schemas
        .iter()
        .map(|schema| extract_metadata(provider, schema))
        .collect();

    futures::future::join_all(futures).await
}

/// In-memory provider serving pre-loaded rows.
///
/// Used by the CLI (rows read from JSON files) and by tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    schemas: HashMap<String, (Vec<ColumnRow>, Vec<FkRow>)>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: register rows for a schema.
    pub fn with_schema(
        mut self,
        schema: impl Into<String>,
        columns: Vec<ColumnRow>,
        fks: Vec<FkRow>,
    ) -> Self {
        self.schemas.insert(schema.into(), (columns, fks));
        self
    }

    fn rows(&self, schema: &str) -> ProviderResult<&(Vec<ColumnRow>, Vec<FkRow>)> {
        self.schemas
            .get(schema)
            .ok_or_else(|| ProviderError::SchemaNotFound(schema.to_string()))
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn column_rows(&self, schema: &str) -> ProviderResult<Vec<ColumnRow>> {
        Ok(self.rows(schema)?.0.clone())
    }

    async fn fk_rows(&self, schema: &str) -> ProviderResult<Vec<FkRow>> {
        Ok(self.rows(schema)?.1.clone())
    }
}
