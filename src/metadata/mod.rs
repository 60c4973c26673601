//! Schema metadata module.
//!
//! Turns raw catalog rows into the canonical schema model consumed by
//! relationship inference.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      CatalogProvider                            │
//! │  (per-backend collaborator, async)                              │
//! │  - column_rows()  -> Vec<ColumnRow>                             │
//! │  - fk_rows()      -> Vec<FkRow>                                 │
//! └─────────────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼ [normalize]
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  SchemaMetadata                                                 │
//! │  tables (sorted) -> columns, pk_columns, fk_refs, domain        │
//! │  + Vec<Diagnostic> for dropped FK rows                          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use erdai::metadata::{normalize, ColumnRow, FkRow};
//!
//! let normalized = normalize("shop", &column_rows, &fk_rows)?;
//! for diag in &normalized.diagnostics {
//!     eprintln!("{}", diag);
//! }
//! ```

pub mod domain;
mod error;
mod normalize;
mod provider;
mod rows;
mod types;

pub use domain::classify;
pub use error::{MetadataError, MetadataResult, RowKind};
pub use normalize::{normalize, normalize_at, Diagnostic, Normalized};
pub use provider::{
    extract_metadata, extract_schemas, CatalogProvider, ProviderError, ProviderResult,
    StaticCatalog,
};
pub use rows::{ColumnRow, FkRow};
pub use types::{ColumnMeta, FkMeta, SchemaMetadata, TableMeta, DEFAULT_REFERENTIAL_ACTION};
